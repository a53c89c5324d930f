//! Use cases

pub mod assignment_service;
pub mod query_service;

pub use assignment_service::{
    AssignmentOutcome, AssignmentPlan, AssignmentService, AssignmentServiceError,
};
pub use query_service::{require_capability, AssignmentQuery, QueryService};
