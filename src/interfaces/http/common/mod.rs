//! Extractors, error mapping and response helpers shared by all modules

pub mod api_error;
pub mod api_path;
pub mod response;
pub mod validated_json;
pub mod validated_query;

pub use api_error::ApiError;
pub use api_path::ApiPath;
pub use response::{ResponseContext, API_PREFIX};
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
