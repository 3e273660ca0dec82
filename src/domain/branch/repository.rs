//! Branch repository interface

use async_trait::async_trait;

use super::model::{Branch, NewBranch};
use crate::shared::errors::DomainResult;
use crate::shared::pagination::{PageRequest, PageResult};

/// Subset of branches a listing is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchScope {
    All,
    /// Case-insensitive city match
    City(String),
    /// Upper-case state code
    State(String),
}

#[async_trait]
pub trait BranchRepository: Send + Sync {
    async fn page(&self, scope: BranchScope, request: &PageRequest) -> DomainResult<PageResult<Branch>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Branch>>;
    async fn insert(&self, branch: NewBranch) -> DomainResult<Branch>;
    /// `None` when no branch has `id`.
    async fn update(&self, id: i32, branch: NewBranch) -> DomainResult<Option<Branch>>;
    /// `false` when no branch has `id`.
    async fn delete_by_id(&self, id: i32) -> DomainResult<bool>;
    async fn exists(&self, id: i32) -> DomainResult<bool>;
}
