//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, SelectTwo, Set,
};
use tracing::debug;

use super::constraint_error;
use super::query::{apply_search, apply_sort, eq_ignore_case, lower, SqlQueryRules};
use crate::domain::vehicle::{NewVehicle, Vehicle, VehicleRepository, VehicleScope};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{branch, vehicle};
use crate::shared::pagination::{PageRequest, PageResult};

/// Searchable columns and sort keys for vehicle listings.
struct VehicleColumns;

impl SqlQueryRules for VehicleColumns {
    fn search_columns(&self) -> Vec<SimpleExpr> {
        vec![
            Expr::col((vehicle::Entity, vehicle::Column::Brand)).into(),
            Expr::col((vehicle::Entity, vehicle::Column::Model)).into(),
            Expr::col((vehicle::Entity, vehicle::Column::Plate)).into(),
            Expr::col((vehicle::Entity, vehicle::Column::Color)).into(),
            Expr::col((branch::Entity, branch::Column::Name)).into(),
        ]
    }

    fn sort_key(&self, field: &str) -> Option<SimpleExpr> {
        let key = match field {
            "brand" => lower(Expr::col((vehicle::Entity, vehicle::Column::Brand))),
            "model" => lower(Expr::col((vehicle::Entity, vehicle::Column::Model))),
            "plate" => lower(Expr::col((vehicle::Entity, vehicle::Column::Plate))),
            "branch" => lower(Expr::col((branch::Entity, branch::Column::Name))),
            "year" => Expr::col((vehicle::Entity, vehicle::Column::Year)).into(),
            "mileage" => Expr::col((vehicle::Entity, vehicle::Column::Mileage)).into(),
            _ => return None,
        };
        Some(key)
    }
}

/// Scope and search filters, without ordering or window.
fn filtered(scope: &VehicleScope, request: &PageRequest) -> Select<vehicle::Entity> {
    let query = vehicle::Entity::find();
    let query = match scope {
        VehicleScope::All => query,
        VehicleScope::Branch(branch_id) => query.filter(vehicle::Column::BranchId.eq(*branch_id)),
        VehicleScope::Brand(brand) => query.filter(eq_ignore_case(
            Expr::col((vehicle::Entity, vehicle::Column::Brand)),
            brand,
        )),
        VehicleScope::Year(year) => query.filter(vehicle::Column::Year.eq(*year)),
        VehicleScope::Mileage(range) => {
            query.filter(vehicle::Column::Mileage.between(range.min(), range.max()))
        }
    };
    apply_search(query, &VehicleColumns, request)
}

/// The requested page of `filtered` rows, joined with their branch.
fn window(
    query: Select<vehicle::Entity>,
    request: &PageRequest,
) -> SelectTwo<vehicle::Entity, branch::Entity> {
    apply_sort(query, &VehicleColumns, request, vehicle::Column::Id)
        .find_also_related(branch::Entity)
        .offset(request.offset())
        .limit(u64::from(request.page_size()))
}

fn plate_taken(plate: &str) -> DomainError {
    DomainError::conflict(
        "PLATE_ALREADY_EXISTS",
        format!("Plate {} is already registered", plate),
    )
}

fn unknown_branch(branch_id: i32) -> DomainError {
    DomainError::Dependency {
        entity: "Branch",
        id: branch_id,
    }
}

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, query: Select<vehicle::Entity>) -> DomainResult<Vec<Vehicle>> {
        let rows = query
            .order_by_asc(vehicle::Column::Id)
            .find_also_related(branch::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn load_one(&self, query: Select<vehicle::Entity>) -> DomainResult<Option<Vehicle>> {
        let row = query.find_also_related(branch::Entity).one(&self.db).await?;
        Ok(row.map(to_domain))
    }

    async fn with_branch(&self, model: vehicle::Model) -> DomainResult<Vehicle> {
        let branch = branch::Entity::find_by_id(model.branch_id).one(&self.db).await?;
        Ok(to_domain((model, branch)))
    }
}

fn to_domain((model, branch): (vehicle::Model, Option<branch::Model>)) -> Vehicle {
    Vehicle {
        id: model.id,
        brand: model.brand,
        model: model.model,
        year: model.year,
        plate: model.plate,
        branch_id: model.branch_id,
        color: model.color,
        mileage: model.mileage,
        branch: branch.map(|b| super::branch_repository::to_domain(b).summary()),
    }
}

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn page(&self, scope: VehicleScope, request: &PageRequest) -> DomainResult<PageResult<Vehicle>> {
        let query = filtered(&scope, request);
        let total_items = query.clone().left_join(branch::Entity).count(&self.db).await?;
        let rows = window(query, request).all(&self.db).await?;
        debug!(?scope, total_items, returned = rows.len(), "Loaded vehicle page");

        Ok(PageResult::new(
            rows.into_iter().map(to_domain).collect(),
            request.page_number(),
            request.page_size(),
            total_items,
        ))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        self.load_one(vehicle::Entity::find_by_id(id)).await
    }

    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        self.load_one(vehicle::Entity::find().filter(vehicle::Column::Plate.eq(plate)))
            .await
    }

    async fn list_by_branch(&self, branch_id: i32) -> DomainResult<Vec<Vehicle>> {
        self.load(vehicle::Entity::find().filter(vehicle::Column::BranchId.eq(branch_id)))
            .await
    }

    async fn count_by_branch(&self, branch_id: i32) -> DomainResult<u64> {
        let count = vehicle::Entity::find()
            .filter(vehicle::Column::BranchId.eq(branch_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn plate_exists(&self, plate: &str, excluding: Option<i32>) -> DomainResult<bool> {
        let mut query = vehicle::Entity::find().filter(vehicle::Column::Plate.eq(plate));
        if let Some(id) = excluding {
            query = query.filter(vehicle::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn insert(&self, new: NewVehicle) -> DomainResult<Vehicle> {
        let (plate, branch_id) = (new.plate.clone(), new.branch_id);
        let now = Utc::now();
        let model = vehicle::ActiveModel {
            brand: Set(new.brand),
            model: Set(new.model),
            year: Set(new.year),
            plate: Set(new.plate),
            branch_id: Set(new.branch_id),
            color: Set(new.color),
            mileage: Set(new.mileage),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| constraint_error(e, || plate_taken(&plate), || unknown_branch(branch_id)))?;
        self.with_branch(saved).await
    }

    async fn update(&self, id: i32, changes: NewVehicle) -> DomainResult<Option<Vehicle>> {
        let Some(existing) = vehicle::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let (plate, branch_id) = (changes.plate.clone(), changes.branch_id);
        let mut active: vehicle::ActiveModel = existing.into();
        active.brand = Set(changes.brand);
        active.model = Set(changes.model);
        active.year = Set(changes.year);
        active.plate = Set(changes.plate);
        active.branch_id = Set(changes.branch_id);
        active.color = Set(changes.color);
        active.mileage = Set(changes.mileage);
        active.updated_at = Set(Utc::now());

        let saved = active
            .update(&self.db)
            .await
            .map_err(|e| constraint_error(e, || plate_taken(&plate), || unknown_branch(branch_id)))?;
        self.with_branch(saved).await.map(Some)
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<bool> {
        let result = vehicle::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(vehicle::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }
}
