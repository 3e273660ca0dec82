//! HTTP REST API interfaces
//!
//! - `common`: extractors, error mapping and paged response helpers
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};
