//! SeaORM implementation of BranchRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Select, Set,
};
use tracing::debug;

use super::constraint_error;
use super::query::{apply_search, apply_sort, eq_ignore_case, lower, SqlQueryRules};
use crate::domain::branch::{Branch, BranchRepository, BranchScope, NewBranch};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::branch;
use crate::shared::pagination::{PageRequest, PageResult};

struct BranchColumns;

impl SqlQueryRules for BranchColumns {
    fn search_columns(&self) -> Vec<SimpleExpr> {
        [
            branch::Column::Name,
            branch::Column::Address,
            branch::Column::City,
            branch::Column::State,
            branch::Column::PostalCode,
        ]
        .into_iter()
        .map(|column| Expr::col((branch::Entity, column)).into())
        .collect()
    }

    fn sort_key(&self, field: &str) -> Option<SimpleExpr> {
        let column = match field {
            "name" => branch::Column::Name,
            "address" => branch::Column::Address,
            "city" => branch::Column::City,
            "state" => branch::Column::State,
            "postalcode" | "cep" => branch::Column::PostalCode,
            _ => return None,
        };
        Some(lower(Expr::col((branch::Entity, column))))
    }
}

fn filtered(scope: &BranchScope, request: &PageRequest) -> Select<branch::Entity> {
    let query = branch::Entity::find();
    let query = match scope {
        BranchScope::All => query,
        BranchScope::City(city) => {
            query.filter(eq_ignore_case(Expr::col((branch::Entity, branch::Column::City)), city))
        }
        BranchScope::State(state) => query.filter(branch::Column::State.eq(state.as_str())),
    };
    apply_search(query, &BranchColumns, request)
}

pub struct SeaOrmBranchRepository {
    db: DatabaseConnection,
}

impl SeaOrmBranchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn to_domain(model: branch::Model) -> Branch {
    Branch {
        id: model.id,
        name: model.name,
        address: model.address,
        city: model.city,
        state: model.state,
        postal_code: model.postal_code,
    }
}

#[async_trait]
impl BranchRepository for SeaOrmBranchRepository {
    async fn page(&self, scope: BranchScope, request: &PageRequest) -> DomainResult<PageResult<Branch>> {
        let query = filtered(&scope, request);
        let total_items = query.clone().count(&self.db).await?;
        let rows = apply_sort(query, &BranchColumns, request, branch::Column::Id)
            .offset(request.offset())
            .limit(u64::from(request.page_size()))
            .all(&self.db)
            .await?;
        debug!(?scope, total_items, returned = rows.len(), "Loaded branch page");

        Ok(PageResult::new(
            rows.into_iter().map(to_domain).collect(),
            request.page_number(),
            request.page_size(),
            total_items,
        ))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Branch>> {
        let model = branch::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(to_domain))
    }

    async fn insert(&self, new: NewBranch) -> DomainResult<Branch> {
        let now = Utc::now();
        let model = branch::ActiveModel {
            name: Set(new.name),
            address: Set(new.address),
            city: Set(new.city),
            state: Set(new.state),
            postal_code: Set(new.postal_code),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await?;
        Ok(to_domain(saved))
    }

    async fn update(&self, id: i32, changes: NewBranch) -> DomainResult<Option<Branch>> {
        let Some(existing) = branch::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: branch::ActiveModel = existing.into();
        active.name = Set(changes.name);
        active.address = Set(changes.address);
        active.city = Set(changes.city);
        active.state = Set(changes.state);
        active.postal_code = Set(changes.postal_code);
        active.updated_at = Set(Utc::now());

        let saved = active.update(&self.db).await?;
        Ok(Some(to_domain(saved)))
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<bool> {
        let in_use = || {
            DomainError::conflict(
                "BRANCH_HAS_DEPENDENCIES",
                format!("Branch {} still has employees or vehicles", id),
            )
        };
        let result = branch::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| constraint_error(e, in_use, in_use))?;
        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(branch::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }
}
