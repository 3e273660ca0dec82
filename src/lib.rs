//! # Fleet Service
//!
//! REST backend for a vehicle-fleet company: branches, their employees and
//! their vehicles, with paginated, searchable and sortable listings whose
//! responses carry hypermedia navigation links.
//!
//! ## Architecture
//!
//! - **domain**: entities, scopes, query rules and repository traits
//! - **application**: use-case services on top of the repositories
//! - **infrastructure**: SeaORM (SQLite) and in-memory repositories
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: pagination core, error types, graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export storage entry points
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiDoc, ApiState};
