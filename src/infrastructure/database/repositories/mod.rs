//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod branch_repository;
pub mod employee_repository;
pub mod query;
pub mod repository_provider;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Translate constraint violations raised by a write into domain errors.
///
/// Unique and foreign-key violations use the given constructors; anything
/// else stays a storage error.
pub(crate) fn constraint_error(
    err: DbErr,
    on_unique: impl FnOnce() -> DomainError,
    on_foreign_key: impl FnOnce() -> DomainError,
) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Unique constraint violated");
            on_unique()
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Foreign key constraint violated");
            on_foreign_key()
        }
        _ => err.into(),
    }
}
