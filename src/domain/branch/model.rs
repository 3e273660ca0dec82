//! Branch domain entity

/// Company branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    /// Two-letter state code, upper-case
    pub state: String,
    /// `00000-000` or `00000000`
    pub postal_code: Option<String>,
}

impl Branch {
    pub fn summary(&self) -> BranchSummary {
        BranchSummary {
            id: self.id,
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
        }
    }
}

/// Fields supplied when creating or replacing a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBranch {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
}

impl NewBranch {
    pub fn into_branch(self, id: i32) -> Branch {
        Branch {
            id,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
        }
    }
}

/// Compact branch view embedded in employee and vehicle responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSummary {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchStats {
    pub total_employees: u64,
    pub total_vehicles: u64,
}

impl BranchStats {
    pub fn has_dependents(&self) -> bool {
        self.total_employees > 0 || self.total_vehicles > 0
    }
}
