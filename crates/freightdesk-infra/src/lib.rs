//! Infrastructure layer - REST client and session handling

pub mod rest;
pub mod session;

pub use rest::{RestClient, DEFAULT_TIMEOUT};
pub use session::{CredentialProvider, Session};
