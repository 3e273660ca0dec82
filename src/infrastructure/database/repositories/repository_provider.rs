//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::branch::BranchRepository;
use crate::domain::employee::EmployeeRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::vehicle::VehicleRepository;

use super::branch_repository::SeaOrmBranchRepository;
use super::employee_repository::SeaOrmEmployeeRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let branch = repos.branches().find_by_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    branches: SeaOrmBranchRepository,
    employees: SeaOrmEmployeeRepository,
    vehicles: SeaOrmVehicleRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            branches: SeaOrmBranchRepository::new(db.clone()),
            employees: SeaOrmEmployeeRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn branches(&self) -> &dyn BranchRepository {
        &self.branches
    }

    fn employees(&self) -> &dyn EmployeeRepository {
        &self.employees
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }
}
