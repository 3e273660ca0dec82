//! Vehicle repository interface

use async_trait::async_trait;

use super::model::{MileageRange, NewVehicle, Vehicle};
use crate::shared::errors::DomainResult;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleScope {
    All,
    Branch(i32),
    /// Case-insensitive brand match
    Brand(String),
    Year(i32),
    Mileage(MileageRange),
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn page(&self, scope: VehicleScope, request: &PageRequest) -> DomainResult<PageResult<Vehicle>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>>;
    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>>;
    async fn list_by_branch(&self, branch_id: i32) -> DomainResult<Vec<Vehicle>>;
    async fn count_by_branch(&self, branch_id: i32) -> DomainResult<u64>;
    async fn plate_exists(&self, plate: &str, excluding: Option<i32>) -> DomainResult<bool>;
    async fn insert(&self, vehicle: NewVehicle) -> DomainResult<Vehicle>;
    async fn update(&self, id: i32, vehicle: NewVehicle) -> DomainResult<Option<Vehicle>>;
    async fn delete_by_id(&self, id: i32) -> DomainResult<bool>;
    async fn exists(&self, id: i32) -> DomainResult<bool>;
}
