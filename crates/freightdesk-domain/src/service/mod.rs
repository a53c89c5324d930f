//! Domain services

pub mod capacity;
pub mod filter;
pub mod planner;

pub use capacity::{
    check_capacity, compute_totals, format_amount, generate_capacity_report, CapacityCheck, Totals,
};
pub use filter::{filter_inventory, matches_search};
pub use planner::{AssignmentPlanner, PlannerError, PlannerState, ValidationError};
