//! Employee aggregate

pub mod model;
pub mod repository;
pub mod rules;

pub use model::{Employee, NewEmployee};
pub use repository::{EmployeeRepository, EmployeeScope};
pub use rules::EmployeeQueryRules;
