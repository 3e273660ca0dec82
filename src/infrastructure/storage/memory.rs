//! In-memory storage implementation
//!
//! DashMap-backed repositories for development and tests. All three
//! repositories share one set of tables so branch summaries and
//! per-branch counts stay consistent.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::branch::{Branch, BranchQueryRules, BranchRepository, BranchScope, BranchSummary, NewBranch};
use crate::domain::employee::{Employee, EmployeeQueryRules, EmployeeRepository, EmployeeScope, NewEmployee};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::vehicle::{NewVehicle, Vehicle, VehicleQueryRules, VehicleRepository, VehicleScope};
use crate::domain::DomainResult;
use crate::shared::pagination::{paginate, PageRequest, PageResult};

#[derive(Default)]
struct Tables {
    branches: DashMap<i32, Branch>,
    employees: DashMap<i32, Employee>,
    vehicles: DashMap<i32, Vehicle>,
    branch_counter: AtomicI32,
    employee_counter: AtomicI32,
    vehicle_counter: AtomicI32,
}

impl Tables {
    fn summary(&self, branch_id: i32) -> Option<BranchSummary> {
        self.branches.get(&branch_id).map(|b| b.summary())
    }

    /// Rows in id order, as a database would return them by default.
    fn sorted<T: Clone>(map: &DashMap<i32, T>, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<(i32, T)> = map
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    fn employee_view(&self, mut employee: Employee) -> Employee {
        employee.branch = self.summary(employee.branch_id);
        employee
    }

    fn vehicle_view(&self, mut vehicle: Vehicle) -> Vehicle {
        vehicle.branch = self.summary(vehicle.branch_id);
        vehicle
    }
}

fn next_id(counter: &AtomicI32) -> i32 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

pub struct InMemoryBranchRepository {
    tables: Arc<Tables>,
}

pub struct InMemoryEmployeeRepository {
    tables: Arc<Tables>,
}

pub struct InMemoryVehicleRepository {
    tables: Arc<Tables>,
}

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    branches: InMemoryBranchRepository,
    employees: InMemoryEmployeeRepository,
    vehicles: InMemoryVehicleRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let tables = Arc::new(Tables::default());
        Self {
            branches: InMemoryBranchRepository { tables: tables.clone() },
            employees: InMemoryEmployeeRepository { tables: tables.clone() },
            vehicles: InMemoryVehicleRepository { tables },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

#[async_trait]
impl BranchRepository for InMemoryBranchRepository {
    async fn page(&self, scope: BranchScope, request: &PageRequest) -> DomainResult<PageResult<Branch>> {
        let records = Tables::sorted(&self.tables.branches, |b| match &scope {
            BranchScope::All => true,
            BranchScope::City(city) => b.city.to_lowercase() == city.to_lowercase(),
            BranchScope::State(state) => b.state == *state,
        });
        Ok(paginate(records, request, &BranchQueryRules))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Branch>> {
        Ok(self.tables.branches.get(&id).map(|b| b.clone()))
    }

    async fn insert(&self, new: NewBranch) -> DomainResult<Branch> {
        let branch = new.into_branch(next_id(&self.tables.branch_counter));
        self.tables.branches.insert(branch.id, branch.clone());
        Ok(branch)
    }

    async fn update(&self, id: i32, changes: NewBranch) -> DomainResult<Option<Branch>> {
        Ok(self.tables.branches.get_mut(&id).map(|mut entry| {
            *entry = changes.into_branch(id);
            entry.clone()
        }))
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<bool> {
        Ok(self.tables.branches.remove(&id).is_some())
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(self.tables.branches.contains_key(&id))
    }
}

fn employee_from(id: i32, new: NewEmployee) -> Employee {
    Employee {
        id,
        name: new.name,
        email: new.email,
        branch_id: new.branch_id,
        role: new.role,
        branch: None,
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn page(&self, scope: EmployeeScope, request: &PageRequest) -> DomainResult<PageResult<Employee>> {
        let records = Tables::sorted(&self.tables.employees, |e| match scope {
            EmployeeScope::All => true,
            EmployeeScope::Branch(branch_id) => e.branch_id == branch_id,
        });
        let records = records.into_iter().map(|e| self.tables.employee_view(e));
        Ok(paginate(records, request, &EmployeeQueryRules))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Employee>> {
        let employee = self.tables.employees.get(&id).map(|e| e.clone());
        Ok(employee.map(|e| self.tables.employee_view(e)))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Employee>> {
        let employee = Tables::sorted(&self.tables.employees, |e| e.email == email)
            .into_iter()
            .next();
        Ok(employee.map(|e| self.tables.employee_view(e)))
    }

    async fn list_by_branch(&self, branch_id: i32) -> DomainResult<Vec<Employee>> {
        Ok(Tables::sorted(&self.tables.employees, |e| e.branch_id == branch_id)
            .into_iter()
            .map(|e| self.tables.employee_view(e))
            .collect())
    }

    async fn count_by_branch(&self, branch_id: i32) -> DomainResult<u64> {
        let count = self
            .tables
            .employees
            .iter()
            .filter(|e| e.branch_id == branch_id)
            .count();
        Ok(count as u64)
    }

    async fn email_exists(&self, email: &str, excluding: Option<i32>) -> DomainResult<bool> {
        Ok(self
            .tables
            .employees
            .iter()
            .any(|e| e.email == email && Some(e.id) != excluding))
    }

    async fn insert(&self, new: NewEmployee) -> DomainResult<Employee> {
        let employee = employee_from(next_id(&self.tables.employee_counter), new);
        self.tables.employees.insert(employee.id, employee.clone());
        Ok(self.tables.employee_view(employee))
    }

    async fn update(&self, id: i32, changes: NewEmployee) -> DomainResult<Option<Employee>> {
        let updated = self.tables.employees.get_mut(&id).map(|mut entry| {
            *entry = employee_from(id, changes);
            entry.clone()
        });
        Ok(updated.map(|e| self.tables.employee_view(e)))
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<bool> {
        Ok(self.tables.employees.remove(&id).is_some())
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(self.tables.employees.contains_key(&id))
    }
}

fn vehicle_from(id: i32, new: NewVehicle) -> Vehicle {
    Vehicle {
        id,
        brand: new.brand,
        model: new.model,
        year: new.year,
        plate: new.plate,
        branch_id: new.branch_id,
        color: new.color,
        mileage: new.mileage,
        branch: None,
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn page(&self, scope: VehicleScope, request: &PageRequest) -> DomainResult<PageResult<Vehicle>> {
        let records = Tables::sorted(&self.tables.vehicles, |v| match &scope {
            VehicleScope::All => true,
            VehicleScope::Branch(branch_id) => v.branch_id == *branch_id,
            VehicleScope::Brand(brand) => v.brand.to_lowercase() == brand.to_lowercase(),
            VehicleScope::Year(year) => v.year == *year,
            VehicleScope::Mileage(range) => range.contains(v.mileage),
        });
        let records = records.into_iter().map(|v| self.tables.vehicle_view(v));
        Ok(paginate(records, request, &VehicleQueryRules))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        let vehicle = self.tables.vehicles.get(&id).map(|v| v.clone());
        Ok(vehicle.map(|v| self.tables.vehicle_view(v)))
    }

    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        let vehicle = Tables::sorted(&self.tables.vehicles, |v| v.plate == plate)
            .into_iter()
            .next();
        Ok(vehicle.map(|v| self.tables.vehicle_view(v)))
    }

    async fn list_by_branch(&self, branch_id: i32) -> DomainResult<Vec<Vehicle>> {
        Ok(Tables::sorted(&self.tables.vehicles, |v| v.branch_id == branch_id)
            .into_iter()
            .map(|v| self.tables.vehicle_view(v))
            .collect())
    }

    async fn count_by_branch(&self, branch_id: i32) -> DomainResult<u64> {
        let count = self
            .tables
            .vehicles
            .iter()
            .filter(|v| v.branch_id == branch_id)
            .count();
        Ok(count as u64)
    }

    async fn plate_exists(&self, plate: &str, excluding: Option<i32>) -> DomainResult<bool> {
        Ok(self
            .tables
            .vehicles
            .iter()
            .any(|v| v.plate == plate && Some(v.id) != excluding))
    }

    async fn insert(&self, new: NewVehicle) -> DomainResult<Vehicle> {
        let vehicle = vehicle_from(next_id(&self.tables.vehicle_counter), new);
        self.tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(self.tables.vehicle_view(vehicle))
    }

    async fn update(&self, id: i32, changes: NewVehicle) -> DomainResult<Option<Vehicle>> {
        let updated = self.tables.vehicles.get_mut(&id).map(|mut entry| {
            *entry = vehicle_from(id, changes);
            entry.clone()
        });
        Ok(updated.map(|v| self.tables.vehicle_view(v)))
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<bool> {
        Ok(self.tables.vehicles.remove(&id).is_some())
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(self.tables.vehicles.contains_key(&id))
    }
}
