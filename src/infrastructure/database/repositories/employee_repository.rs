//! SeaORM implementation of EmployeeRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use tracing::debug;

use super::constraint_error;
use super::query::{apply_search, apply_sort, lower, SqlQueryRules};
use crate::domain::employee::{Employee, EmployeeRepository, EmployeeScope, NewEmployee};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{branch, employee};
use crate::shared::pagination::{PageRequest, PageResult};

struct EmployeeColumns;

impl SqlQueryRules for EmployeeColumns {
    fn search_columns(&self) -> Vec<SimpleExpr> {
        vec![
            Expr::col((employee::Entity, employee::Column::Name)).into(),
            Expr::col((employee::Entity, employee::Column::Email)).into(),
            Expr::col((employee::Entity, employee::Column::Role)).into(),
            Expr::col((branch::Entity, branch::Column::Name)).into(),
        ]
    }

    fn sort_key(&self, field: &str) -> Option<SimpleExpr> {
        let key = match field {
            "name" => Expr::col((employee::Entity, employee::Column::Name)),
            "email" => Expr::col((employee::Entity, employee::Column::Email)),
            "role" => Expr::col((employee::Entity, employee::Column::Role)),
            "branch" => Expr::col((branch::Entity, branch::Column::Name)),
            _ => return None,
        };
        Some(lower(key))
    }
}

fn filtered(scope: &EmployeeScope, request: &PageRequest) -> Select<employee::Entity> {
    let query = match scope {
        EmployeeScope::All => employee::Entity::find(),
        EmployeeScope::Branch(branch_id) => {
            employee::Entity::find().filter(employee::Column::BranchId.eq(*branch_id))
        }
    };
    apply_search(query, &EmployeeColumns, request)
}

fn email_taken(email: &str) -> DomainError {
    DomainError::conflict(
        "EMAIL_ALREADY_EXISTS",
        format!("Email {} is already in use", email),
    )
}

fn unknown_branch(branch_id: i32) -> DomainError {
    DomainError::Dependency {
        entity: "Branch",
        id: branch_id,
    }
}

pub struct SeaOrmEmployeeRepository {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, query: Select<employee::Entity>) -> DomainResult<Vec<Employee>> {
        let rows = query
            .order_by_asc(employee::Column::Id)
            .find_also_related(branch::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn load_one(&self, query: Select<employee::Entity>) -> DomainResult<Option<Employee>> {
        let row = query.find_also_related(branch::Entity).one(&self.db).await?;
        Ok(row.map(to_domain))
    }
}

fn to_domain((model, branch): (employee::Model, Option<branch::Model>)) -> Employee {
    Employee {
        id: model.id,
        name: model.name,
        email: model.email,
        branch_id: model.branch_id,
        role: model.role,
        branch: branch.map(|b| super::branch_repository::to_domain(b).summary()),
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn page(&self, scope: EmployeeScope, request: &PageRequest) -> DomainResult<PageResult<Employee>> {
        let query = filtered(&scope, request);
        let total_items = query.clone().left_join(branch::Entity).count(&self.db).await?;
        let rows = apply_sort(query, &EmployeeColumns, request, employee::Column::Id)
            .find_also_related(branch::Entity)
            .offset(request.offset())
            .limit(u64::from(request.page_size()))
            .all(&self.db)
            .await?;
        debug!(?scope, total_items, returned = rows.len(), "Loaded employee page");

        Ok(PageResult::new(
            rows.into_iter().map(to_domain).collect(),
            request.page_number(),
            request.page_size(),
            total_items,
        ))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Employee>> {
        self.load_one(employee::Entity::find_by_id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Employee>> {
        self.load_one(employee::Entity::find().filter(employee::Column::Email.eq(email)))
            .await
    }

    async fn list_by_branch(&self, branch_id: i32) -> DomainResult<Vec<Employee>> {
        self.load(employee::Entity::find().filter(employee::Column::BranchId.eq(branch_id)))
            .await
    }

    async fn count_by_branch(&self, branch_id: i32) -> DomainResult<u64> {
        let count = employee::Entity::find()
            .filter(employee::Column::BranchId.eq(branch_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn email_exists(&self, email: &str, excluding: Option<i32>) -> DomainResult<bool> {
        let mut query = employee::Entity::find().filter(employee::Column::Email.eq(email));
        if let Some(id) = excluding {
            query = query.filter(employee::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn insert(&self, new: NewEmployee) -> DomainResult<Employee> {
        let (email, branch_id) = (new.email.clone(), new.branch_id);
        let now = Utc::now();
        let model = employee::ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            branch_id: Set(new.branch_id),
            role: Set(new.role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| constraint_error(e, || email_taken(&email), || unknown_branch(branch_id)))?;
        let branch = branch::Entity::find_by_id(saved.branch_id).one(&self.db).await?;
        Ok(to_domain((saved, branch)))
    }

    async fn update(&self, id: i32, changes: NewEmployee) -> DomainResult<Option<Employee>> {
        let Some(existing) = employee::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let (email, branch_id) = (changes.email.clone(), changes.branch_id);
        let mut active: employee::ActiveModel = existing.into();
        active.name = Set(changes.name);
        active.email = Set(changes.email);
        active.branch_id = Set(changes.branch_id);
        active.role = Set(changes.role);
        active.updated_at = Set(Utc::now());

        let saved = active
            .update(&self.db)
            .await
            .map_err(|e| constraint_error(e, || email_taken(&email), || unknown_branch(branch_id)))?;
        let branch = branch::Entity::find_by_id(saved.branch_id).one(&self.db).await?;
        Ok(Some(to_domain((saved, branch))))
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<bool> {
        let result = employee::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(employee::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::branch::{BranchRepository, NewBranch};
    use crate::infrastructure::database::repositories::branch_repository::SeaOrmBranchRepository;
    use crate::infrastructure::database::repositories::test_support::connect;
    use crate::shared::pagination::SortDirection;

    async fn seed_branch(db: &DatabaseConnection, name: &str) -> i32 {
        SeaOrmBranchRepository::new(db.clone())
            .insert(NewBranch {
                name: name.into(),
                address: "Rua XV, 10".into(),
                city: "Curitiba".into(),
                state: "PR".into(),
                postal_code: None,
            })
            .await
            .unwrap()
            .id
    }

    fn new_employee(name: &str, email: &str, branch_id: i32) -> NewEmployee {
        NewEmployee {
            name: name.into(),
            email: email.into(),
            branch_id,
            role: "Mechanic".into(),
        }
    }

    #[tokio::test]
    async fn employees_carry_their_branch() {
        let db = connect().await;
        let branch_id = seed_branch(&db, "Batel").await;
        let repo = SeaOrmEmployeeRepository::new(db);

        let created = repo
            .insert(new_employee("Ana", "ana@fleet.test", branch_id))
            .await
            .unwrap();
        assert_eq!(created.branch_name(), Some("Batel"));

        let found = repo.find_by_email("ana@fleet.test").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(repo.count_by_branch(branch_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn email_exists_can_exclude_self() {
        let db = connect().await;
        let branch_id = seed_branch(&db, "Batel").await;
        let repo = SeaOrmEmployeeRepository::new(db);
        let ana = repo
            .insert(new_employee("Ana", "ana@fleet.test", branch_id))
            .await
            .unwrap();

        assert!(repo.email_exists("ana@fleet.test", None).await.unwrap());
        assert!(!repo.email_exists("ana@fleet.test", Some(ana.id)).await.unwrap());
        assert!(!repo.email_exists("bia@fleet.test", None).await.unwrap());
    }

    #[tokio::test]
    async fn branch_scope_and_search() {
        let db = connect().await;
        let north = seed_branch(&db, "Norte").await;
        let south = seed_branch(&db, "Sul").await;
        let repo = SeaOrmEmployeeRepository::new(db);
        repo.insert(new_employee("Ana", "ana@fleet.test", north)).await.unwrap();
        repo.insert(new_employee("Bia", "bia@fleet.test", south)).await.unwrap();
        repo.insert(new_employee("Caio", "caio@fleet.test", south)).await.unwrap();

        let page = repo
            .page(EmployeeScope::Branch(south), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items(), 2);

        let request = PageRequest::default().with_search(Some("norte".into()));
        let page = repo.page(EmployeeScope::All, &request).await.unwrap();
        assert_eq!(page.items()[0].name, "Ana");
        assert_eq!(page.total_items(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_written_directly_is_a_conflict() {
        let db = connect().await;
        let branch_id = seed_branch(&db, "Batel").await;
        let repo = SeaOrmEmployeeRepository::new(db);
        repo.insert(new_employee("Ana", "ana@fleet.test", branch_id)).await.unwrap();

        let err = repo
            .insert(new_employee("Ana Clara", "ana@fleet.test", branch_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "EMAIL_ALREADY_EXISTS");

        let err = repo
            .insert(new_employee("Bia", "bia@fleet.test", branch_id + 100))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Dependency { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn sort_by_branch_pages_in_sql() {
        let db = connect().await;
        let south = seed_branch(&db, "sul").await;
        let north = seed_branch(&db, "Norte").await;
        let repo = SeaOrmEmployeeRepository::new(db);
        repo.insert(new_employee("Ana", "ana@fleet.test", south)).await.unwrap();
        repo.insert(new_employee("Bia", "bia@fleet.test", north)).await.unwrap();
        repo.insert(new_employee("Caio", "caio@fleet.test", north)).await.unwrap();

        let request = PageRequest::new(2, 2)
            .unwrap()
            .with_sort(Some("branch".into()), SortDirection::Asc);
        let page = repo.page(EmployeeScope::All, &request).await.unwrap();
        assert_eq!(page.total_items(), 3);
        assert_eq!(page.items().len(), 1);
        assert_eq!(page.items()[0].name, "Ana");
        assert_eq!(page.items()[0].branch_name(), Some("sul"));
    }
}
