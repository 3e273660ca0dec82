//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to the per-aggregate
//! repositories. Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) -> DomainResult<()> {
//!     let branch = repos.branches().find_by_id(7).await?;
//!     let staff = repos.employees().count_by_branch(7).await?;
//!     Ok(())
//! }
//! ```

use super::branch::BranchRepository;
use super::employee::EmployeeRepository;
use super::vehicle::VehicleRepository;

pub trait RepositoryProvider: Send + Sync {
    fn branches(&self) -> &dyn BranchRepository;
    fn employees(&self) -> &dyn EmployeeRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
}
