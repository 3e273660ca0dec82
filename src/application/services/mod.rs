//! Application services

mod branch;
mod employee;
mod vehicle;

pub use branch::{BranchDetails, BranchService};
pub use employee::EmployeeService;
pub use vehicle::VehicleService;
