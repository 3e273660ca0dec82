//! Vehicle aggregate
//!
//! Motorcycles in the fleet, each assigned to a branch.

pub mod model;
pub mod repository;
pub mod rules;

pub use model::{MileageRange, NewVehicle, Vehicle};
pub use repository::{VehicleRepository, VehicleScope};
pub use rules::VehicleQueryRules;
