//! Application layer: use-cases orchestrating the repositories.
//!
//! HTTP handlers are thin wrappers that delegate to these services.

pub mod services;

pub use services::{BranchDetails, BranchService, EmployeeService, VehicleService};
