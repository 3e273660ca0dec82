//! Validated query-string extractor, the `Query` counterpart of
//! [`ValidatedJson`](super::ValidatedJson).

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiError;
use crate::shared::FieldIssue;

pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;

        value
            .validate()
            .map_err(|errors| ApiError::validation(FieldIssue::from_validation_errors(&errors)))?;

        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::PaginationParams;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;

    async fn handler(ValidatedQuery(params): ValidatedQuery<PaginationParams>) -> String {
        format!("{:?}", params.page_size)
    }

    async fn send(uri: &str) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = Router::new().route("/items", get(handler)).into_service();
        svc.call(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_params() {
        let resp = send("/items?pageNumber=2&pageSize=25&sortDirection=DESC").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_out_of_range_page_size_and_direction_together() {
        let resp = send("/items?pageSize=0&sortDirection=up").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["validationErrors"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn non_numeric_page_is_a_validation_error() {
        let resp = send("/items?pageNumber=abc").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["code"], "VALIDATION_ERROR");
    }
}
