//! Branch aggregate
//!
//! A physical location that employees work at and vehicles are assigned to.

pub mod model;
pub mod repository;
pub mod rules;

pub use model::{Branch, BranchStats, BranchSummary, NewBranch};
pub use repository::{BranchRepository, BranchScope};
pub use rules::BranchQueryRules;
