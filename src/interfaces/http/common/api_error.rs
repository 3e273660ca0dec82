//! Error type returned by every handler.
//!
//! Wraps an [`ErrorPayload`] together with the HTTP status it maps to.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::shared::errors::DomainError;
use crate::shared::pagination::{InvalidPageSize, LinkError};
use crate::shared::{ErrorPayload, FieldIssue};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    payload: ErrorPayload,
}

impl ApiError {
    pub fn new(status: StatusCode, payload: ErrorPayload) -> Self {
        Self { status, payload }
    }

    pub fn validation(issues: Vec<FieldIssue>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorPayload::from_validation(issues))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn payload(&self) -> &ErrorPayload {
        &self.payload
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let code = err.code();
        match err {
            DomainError::Validation { field, message } => {
                Self::validation(vec![FieldIssue::new(field, message)])
            }
            DomainError::NotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ErrorPayload::from_code(code, err.to_string(), None),
            ),
            DomainError::Conflict { message, .. } => Self::new(
                StatusCode::CONFLICT,
                ErrorPayload::from_code(code, message, None),
            ),
            DomainError::BadRequest { message, .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ErrorPayload::from_code(code, message, None),
            ),
            DomainError::Dependency { entity, id } => Self::new(
                StatusCode::BAD_REQUEST,
                ErrorPayload::from_code(
                    code,
                    format!("Referenced {} does not exist", entity.to_lowercase()),
                    Some(format!("{} with id={} not found", entity, id)),
                ),
            ),
            DomainError::Storage(details) => {
                error!("Storage failure: {}", details);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorPayload::from_code(code, "An unexpected error occurred", None),
                )
            }
        }
    }
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        error!("Link generation failed: {}", err);
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorPayload::from_code(
                "LINK_GENERATION_FAILED",
                "Could not build response links",
                Some(err.to_string()),
            ),
        )
    }
}

impl From<InvalidPageSize> for ApiError {
    fn from(err: InvalidPageSize) -> Self {
        Self::validation(vec![
            FieldIssue::new("pageSize", err.to_string()).with_value(err.value.to_string())
        ])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(vec![FieldIssue::new("path", rejection.body_text())])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(vec![FieldIssue::new("query", rejection.body_text())])
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            rejection.status(),
            ErrorPayload::from_code("INVALID_JSON", "Invalid JSON body", Some(rejection.body_text())),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = %self.status, code = %self.payload.code, "Request rejected");
        }
        (self.status, Json(self.payload)).into_response()
    }
}
