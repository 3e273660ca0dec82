use axum::extract::{FromRequestParts, Path};

use super::ApiError;

/// `Path` whose rejection is reported as a `VALIDATION_ERROR` payload.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
