//! Vehicle use-cases

use std::sync::Arc;

use tracing::info;

use super::branch::BRANCH;
use crate::domain::{
    DomainError, DomainResult, MileageRange, NewVehicle, RepositoryProvider, Vehicle, VehicleScope,
};
use crate::shared::pagination::{PageRequest, PageResult};

const VEHICLE: &str = "Vehicle";

pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(&self, request: &PageRequest) -> DomainResult<PageResult<Vehicle>> {
        self.page(VehicleScope::All, request).await
    }

    pub async fn list_by_branch(&self, branch_id: i32, request: &PageRequest) -> DomainResult<PageResult<Vehicle>> {
        if !self.repos.branches().exists(branch_id).await? {
            return Err(DomainError::not_found(BRANCH, "id", branch_id));
        }
        self.page(VehicleScope::Branch(branch_id), request).await
    }

    pub async fn list_by_brand(&self, brand: &str, request: &PageRequest) -> DomainResult<PageResult<Vehicle>> {
        let brand = brand.trim();
        if brand.is_empty() {
            return Err(DomainError::validation("brand", "brand must not be blank"));
        }
        self.page(VehicleScope::Brand(brand.to_string()), request).await
    }

    pub async fn list_by_year(&self, year: i32, request: &PageRequest) -> DomainResult<PageResult<Vehicle>> {
        self.page(VehicleScope::Year(year), request).await
    }

    pub async fn list_by_mileage(&self, range: MileageRange, request: &PageRequest) -> DomainResult<PageResult<Vehicle>> {
        self.page(VehicleScope::Mileage(range), request).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(VEHICLE, "id", id))
    }

    pub async fn get_by_plate(&self, plate: &str) -> DomainResult<Vehicle> {
        let plate = normalize_plate(plate);
        self.repos
            .vehicles()
            .find_by_plate(&plate)
            .await?
            .ok_or_else(|| DomainError::not_found(VEHICLE, "plate", plate))
    }

    async fn page(&self, scope: VehicleScope, request: &PageRequest) -> DomainResult<PageResult<Vehicle>> {
        self.repos.vehicles().page(scope, request).await
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create(&self, vehicle: NewVehicle) -> DomainResult<Vehicle> {
        let vehicle = normalize(vehicle);
        self.check_references(&vehicle, None).await?;

        let created = self.repos.vehicles().insert(vehicle).await?;
        info!(vehicle_id = created.id, plate = %created.plate, "Vehicle created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, vehicle: NewVehicle) -> DomainResult<Vehicle> {
        if !self.repos.vehicles().exists(id).await? {
            return Err(DomainError::not_found(VEHICLE, "id", id));
        }
        let vehicle = normalize(vehicle);
        self.check_references(&vehicle, Some(id)).await?;

        let updated = self
            .repos
            .vehicles()
            .update(id, vehicle)
            .await?
            .ok_or_else(|| DomainError::not_found(VEHICLE, "id", id))?;
        info!(vehicle_id = id, "Vehicle updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.vehicles().delete_by_id(id).await? {
            return Err(DomainError::not_found(VEHICLE, "id", id));
        }
        info!(vehicle_id = id, "Vehicle deleted");
        Ok(())
    }

    async fn check_references(&self, vehicle: &NewVehicle, current: Option<i32>) -> DomainResult<()> {
        if !self.repos.branches().exists(vehicle.branch_id).await? {
            return Err(DomainError::Dependency {
                entity: BRANCH,
                id: vehicle.branch_id,
            });
        }
        if self
            .repos
            .vehicles()
            .plate_exists(&vehicle.plate, current)
            .await?
        {
            return Err(DomainError::conflict(
                "PLATE_ALREADY_EXISTS",
                format!("Plate {} is already registered", vehicle.plate),
            ));
        }
        Ok(())
    }
}

fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

fn normalize(vehicle: NewVehicle) -> NewVehicle {
    NewVehicle {
        brand: vehicle.brand.trim().to_string(),
        model: vehicle.model.trim().to_string(),
        year: vehicle.year,
        plate: normalize_plate(&vehicle.plate),
        branch_id: vehicle.branch_id,
        color: vehicle
            .color
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        mileage: vehicle.mileage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewBranch;
    use crate::infrastructure::InMemoryRepositoryProvider;

    async fn setup() -> (VehicleService, i32) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let branch = repos
            .branches()
            .insert(NewBranch {
                name: "Aldeota".into(),
                address: "Av. Santos Dumont, 2".into(),
                city: "Fortaleza".into(),
                state: "CE".into(),
                postal_code: None,
            })
            .await
            .unwrap();
        (VehicleService::new(repos), branch.id)
    }

    fn new_vehicle(plate: &str, mileage: Option<i64>, branch_id: i32) -> NewVehicle {
        NewVehicle {
            brand: "Honda".into(),
            model: "Biz 125".into(),
            year: 2022,
            plate: plate.into(),
            branch_id,
            color: Some("  ".into()),
            mileage,
        }
    }

    #[tokio::test]
    async fn plates_are_unique_and_upper_cased() {
        let (svc, branch_id) = setup().await;
        let bike = svc.create(new_vehicle("abc1d23", None, branch_id)).await.unwrap();
        assert_eq!(bike.plate, "ABC1D23");
        assert_eq!(bike.color, None);

        let err = svc.create(new_vehicle("ABC1D23", None, branch_id)).await.unwrap_err();
        assert_eq!(err.code(), "PLATE_ALREADY_EXISTS");

        assert_eq!(svc.get_by_plate("abc1d23").await.unwrap().id, bike.id);
    }

    #[tokio::test]
    async fn create_requires_existing_branch() {
        let (svc, branch_id) = setup().await;
        let err = svc
            .create(new_vehicle("ABC-1234", None, branch_id + 7))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Dependency { .. }));
    }

    #[tokio::test]
    async fn mileage_listing_uses_inclusive_bounds() {
        let (svc, branch_id) = setup().await;
        svc.create(new_vehicle("AAA-0001", Some(100), branch_id)).await.unwrap();
        svc.create(new_vehicle("AAA-0002", Some(500), branch_id)).await.unwrap();
        svc.create(new_vehicle("AAA-0003", Some(900), branch_id)).await.unwrap();

        let range = MileageRange::new(100, 500).unwrap();
        let page = svc.list_by_mileage(range, &PageRequest::default()).await.unwrap();
        assert_eq!(page.total_items(), 2);
    }

    #[tokio::test]
    async fn update_and_delete_missing_vehicle() {
        let (svc, branch_id) = setup().await;
        let err = svc
            .update(3, new_vehicle("ABC-1234", None, branch_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VEHICLE_NOT_FOUND");
        assert_eq!(svc.delete(3).await.unwrap_err().code(), "VEHICLE_NOT_FOUND");
    }
}
