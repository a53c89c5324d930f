//! Session credentials for the REST backend
//!
//! The REST client never reads tokens from ambient storage; it is handed a
//! [`CredentialProvider`] and asks it for a bearer token on every request.

use chrono::{DateTime, Utc};
use freightdesk_domain::model::Role;
use freightdesk_types::ApiError;

/// Supplies the bearer token attached to each request
pub trait CredentialProvider {
    fn bearer_token(&self) -> Result<String, ApiError>;
}

/// Logged-in user as far as this client is concerned
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    pub role: Option<Role>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            role: None,
            expires_at: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

impl CredentialProvider for Session {
    fn bearer_token(&self) -> Result<String, ApiError> {
        if self.token.trim().is_empty() {
            return Err(ApiError::Unauthorized(
                "no session token; set FREIGHTDESK_TOKEN or run `freightdesk config --set-token`"
                    .to_string(),
            ));
        }
        if self.is_expired() {
            return Err(ApiError::Unauthorized("session expired; log in again".to_string()));
        }
        Ok(self.token.clone())
    }
}
