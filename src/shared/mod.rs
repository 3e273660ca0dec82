pub mod error_payload;
pub mod errors;
pub mod pagination;
pub mod shutdown;

pub use error_payload::{ErrorPayload, FieldIssue};
pub use errors::{DomainError, DomainResult};
pub use shutdown::*;
