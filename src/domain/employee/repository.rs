//! Employee repository interface

use async_trait::async_trait;

use super::model::{Employee, NewEmployee};
use crate::shared::errors::DomainResult;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeScope {
    All,
    Branch(i32),
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn page(&self, scope: EmployeeScope, request: &PageRequest) -> DomainResult<PageResult<Employee>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Employee>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Employee>>;
    /// All employees of a branch in id order.
    async fn list_by_branch(&self, branch_id: i32) -> DomainResult<Vec<Employee>>;
    async fn count_by_branch(&self, branch_id: i32) -> DomainResult<u64>;
    /// Whether another employee (other than `excluding`) already uses `email`.
    async fn email_exists(&self, email: &str, excluding: Option<i32>) -> DomainResult<bool>;
    async fn insert(&self, employee: NewEmployee) -> DomainResult<Employee>;
    async fn update(&self, id: i32, employee: NewEmployee) -> DomainResult<Option<Employee>>;
    async fn delete_by_id(&self, id: i32) -> DomainResult<bool>;
    async fn exists(&self, id: i32) -> DomainResult<bool>;
}
