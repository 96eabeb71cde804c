//! Shared building blocks for the Kairos task planner: identifiers, task
//! value types, engine limits and layered configuration.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
