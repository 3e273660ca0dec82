pub mod branch;
pub mod employee;
pub mod repositories;
pub mod vehicle;

pub use branch::{Branch, BranchScope, BranchStats, BranchSummary, NewBranch};
pub use employee::{Employee, EmployeeScope, NewEmployee};
pub use repositories::RepositoryProvider;
pub use vehicle::{MileageRange, NewVehicle, Vehicle, VehicleScope};

pub use crate::shared::errors::{DomainError, DomainResult};
