//! Branch use-cases: listings, details, statistics and guarded deletion.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Branch, BranchScope, BranchStats, DomainError, DomainResult, Employee, NewBranch,
    RepositoryProvider, Vehicle,
};
use crate::shared::pagination::{PageRequest, PageResult};

pub const BRANCH: &str = "Branch";

/// A branch with everything assigned to it.
#[derive(Debug, Clone)]
pub struct BranchDetails {
    pub branch: Branch,
    pub employees: Vec<Employee>,
    pub vehicles: Vec<Vehicle>,
    pub stats: BranchStats,
}

pub struct BranchService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BranchService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(&self, request: &PageRequest) -> DomainResult<PageResult<Branch>> {
        self.repos.branches().page(BranchScope::All, request).await
    }

    pub async fn list_by_city(&self, city: &str, request: &PageRequest) -> DomainResult<PageResult<Branch>> {
        let city = city.trim();
        if city.is_empty() {
            return Err(DomainError::validation("city", "city must not be blank"));
        }
        self.repos
            .branches()
            .page(BranchScope::City(city.to_string()), request)
            .await
    }

    /// `state` must be a two-letter code; it is upper-cased before lookup.
    pub async fn list_by_state(&self, state: &str, request: &PageRequest) -> DomainResult<PageResult<Branch>> {
        let state = state.trim();
        if state.chars().count() != 2 {
            return Err(DomainError::bad_request(
                "INVALID_STATE",
                "State must be a 2-letter code",
            ));
        }
        self.repos
            .branches()
            .page(BranchScope::State(state.to_uppercase()), request)
            .await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Branch> {
        self.repos
            .branches()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(BRANCH, "id", id))
    }

    pub async fn details(&self, id: i32) -> DomainResult<BranchDetails> {
        let branch = self.get(id).await?;
        let employees = self.repos.employees().list_by_branch(id).await?;
        let vehicles = self.repos.vehicles().list_by_branch(id).await?;
        let stats = BranchStats {
            total_employees: employees.len() as u64,
            total_vehicles: vehicles.len() as u64,
        };
        Ok(BranchDetails {
            branch,
            employees,
            vehicles,
            stats,
        })
    }

    pub async fn stats(&self, id: i32) -> DomainResult<BranchStats> {
        if !self.repos.branches().exists(id).await? {
            return Err(DomainError::not_found(BRANCH, "id", id));
        }
        self.count_dependents(id).await
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create(&self, branch: NewBranch) -> DomainResult<Branch> {
        let created = self.repos.branches().insert(normalize(branch)).await?;
        info!(branch_id = created.id, name = %created.name, "Branch created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, branch: NewBranch) -> DomainResult<Branch> {
        let updated = self
            .repos
            .branches()
            .update(id, normalize(branch))
            .await?
            .ok_or_else(|| DomainError::not_found(BRANCH, "id", id))?;
        info!(branch_id = id, "Branch updated");
        Ok(updated)
    }

    /// Refused while employees or vehicles still reference the branch.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.branches().exists(id).await? {
            return Err(DomainError::not_found(BRANCH, "id", id));
        }

        let stats = self.count_dependents(id).await?;
        if stats.has_dependents() {
            return Err(DomainError::conflict(
                "BRANCH_HAS_DEPENDENCIES",
                format!(
                    "Branch {} still has {} employee(s) and {} vehicle(s)",
                    id, stats.total_employees, stats.total_vehicles
                ),
            ));
        }

        self.repos.branches().delete_by_id(id).await?;
        info!(branch_id = id, "Branch deleted");
        Ok(())
    }

    async fn count_dependents(&self, id: i32) -> DomainResult<BranchStats> {
        Ok(BranchStats {
            total_employees: self.repos.employees().count_by_branch(id).await?,
            total_vehicles: self.repos.vehicles().count_by_branch(id).await?,
        })
    }
}

fn normalize(branch: NewBranch) -> NewBranch {
    NewBranch {
        name: branch.name.trim().to_string(),
        address: branch.address.trim().to_string(),
        city: branch.city.trim().to_string(),
        state: branch.state.trim().to_uppercase(),
        postal_code: branch
            .postal_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
    }
}
