//! Application service layer - config, assignment use case, queries

pub mod app;
pub mod config;
pub mod repository;
