//! Database entities module

pub mod branch;
pub mod employee;
pub mod vehicle;

pub use branch::Entity as Branch;
pub use employee::Entity as Employee;
pub use vehicle::Entity as Vehicle;
