//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value.
//! On validation failure it returns a 400 `VALIDATION_ERROR` payload listing
//! every failing field.

use axum::extract::FromRequest;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiError;
use crate::shared::FieldIssue;

/// An extractor that deserializes JSON and validates it.
///
/// # Usage
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct BranchRequest {
///     #[validate(length(min = 1, max = 100))]
///     name: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<BranchRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|errors| ApiError::validation(FieldIssue::from_validation_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct TestBody {
        #[validate(length(min = 1, max = 10))]
        name: String,
        #[validate(range(min = 1, max = 100))]
        branch_id: u32,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    fn json_request(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"name": "Alice", "branchId": 30});
        let resp = send(json_request(Body::from(serde_json::to_vec(&body).unwrap()))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let resp = send(json_request(Body::from("not json"))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_failure_lists_every_field() {
        let body = serde_json::json!({"name": "", "branchId": 0});
        let resp = send(json_request(Body::from(serde_json::to_vec(&body).unwrap()))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = payload["validationErrors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|issue| issue["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["branchId", "name"]);
    }
}
