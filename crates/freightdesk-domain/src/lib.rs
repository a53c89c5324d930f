//! Domain layer: entity models, capacity arithmetic, and the assignment planner

pub mod model;
pub mod repository;
pub mod service;
