//! Employee domain entity

use crate::domain::branch::BranchSummary;

/// Employee working at a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    /// Unique across all employees, compared case-insensitively
    pub email: String,
    pub branch_id: i32,
    pub role: String,
    /// Loaded alongside the employee when the branch still exists
    pub branch: Option<BranchSummary>,
}

impl Employee {
    pub fn branch_name(&self) -> Option<&str> {
        self.branch.as_ref().map(|b| b.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub branch_id: i32,
    pub role: String,
}
