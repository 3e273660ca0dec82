use thiserror::Error;

/// Error taxonomy shared by services, repositories and the HTTP layer.
///
/// Every variant carries a stable machine-readable `code` that ends up in the
/// `ErrorPayload` returned to clients.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with {field}={value} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {message}")]
    Validation { field: String, message: String },

    #[error("Conflict: {message}")]
    Conflict { code: &'static str, message: String },

    /// Malformed input outside field validation, reported under its own code
    #[error("{message}")]
    BadRequest { code: &'static str, message: String },

    #[error("Dependency: {entity} with id={id} not found")]
    Dependency { entity: &'static str, id: i32 },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    /// Stable identifier reported as `ErrorPayload::code`.
    pub fn code(&self) -> String {
        match self {
            DomainError::NotFound { entity, .. } => {
                format!("{}_NOT_FOUND", entity.to_uppercase())
            }
            DomainError::Validation { .. } => "VALIDATION_ERROR".to_string(),
            DomainError::Conflict { code, .. } | DomainError::BadRequest { code, .. } => {
                code.to_string()
            }
            DomainError::Dependency { entity, .. } => {
                format!("{}_NOT_FOUND", entity.to_uppercase())
            }
            DomainError::Storage(_) => "INTERNAL_ERROR".to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_derived_from_entity_names() {
        assert_eq!(
            DomainError::not_found("Branch", "id", 7).code(),
            "BRANCH_NOT_FOUND"
        );
        assert_eq!(
            DomainError::Dependency {
                entity: "Branch",
                id: 3
            }
            .code(),
            "BRANCH_NOT_FOUND"
        );
        assert_eq!(
            DomainError::conflict("EMAIL_ALREADY_EXISTS", "taken").code(),
            "EMAIL_ALREADY_EXISTS"
        );
        assert_eq!(
            DomainError::bad_request("INVALID_STATE", "bad").code(),
            "INVALID_STATE"
        );
        assert_eq!(
            DomainError::validation("state", "bad").code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn not_found_message_names_the_lookup() {
        let err = DomainError::not_found("Employee", "email", "a@b.com");
        assert_eq!(err.to_string(), "Employee with email=a@b.com not found");
    }
}
