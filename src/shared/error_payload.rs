//! Uniform error body returned for every failed request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// One failing input field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Flatten `validator` errors, nested structs included, into issues
    /// ordered by field path. Field names are reported in camelCase.
    pub fn from_validation_errors(errors: &ValidationErrors) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        collect_issues(errors, None, &mut issues);
        issues
    }
}

fn collect_issues(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<FieldIssue>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let name = if *field == "__all__" {
            prefix.unwrap_or("request").to_string()
        } else {
            let field = camel_case(field);
            match prefix {
                Some(prefix) => format!("{prefix}.{field}"),
                None => field,
            }
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{name} is invalid ({})", err.code));
                    let value = err.params.get("value").map(|v| match v.as_str() {
                        Some(s) => s.to_string(),
                        None => v.to_string(),
                    });
                    out.push(FieldIssue {
                        field: name.clone(),
                        message,
                        value,
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_issues(inner, Some(&name), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_issues(inner, Some(&format!("{name}[{index}]")), out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Error body: a stable `code`, a human message and, for validation
/// failures, every offending field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub validation_errors: Vec<FieldIssue>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorPayload {
    pub fn from_validation(issues: Vec<FieldIssue>) -> Self {
        Self {
            code: VALIDATION_ERROR.to_string(),
            message: "One or more validation errors occurred".to_string(),
            details: None,
            validation_errors: issues,
            timestamp: Utc::now(),
        }
    }

    pub fn from_code(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
            validation_errors: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Body {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(range(min = 1))]
        branch_id: i32,
    }

    #[test]
    fn two_issues_become_two_entries() {
        let payload = ErrorPayload::from_validation(vec![
            FieldIssue::new("name", "required"),
            FieldIssue::new("email", "invalid").with_value("nope"),
        ]);
        assert_eq!(payload.code, "VALIDATION_ERROR");
        assert_eq!(payload.validation_errors.len(), 2);
        assert_eq!(payload.validation_errors[0].field, "name");
        assert_eq!(payload.validation_errors[1].value.as_deref(), Some("nope"));
    }

    #[test]
    fn validator_errors_are_flattened_in_field_order() {
        let body = Body {
            name: String::new(),
            branch_id: 0,
        };
        let errors = body.validate().unwrap_err();
        let issues = FieldIssue::from_validation_errors(&errors);
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["branchId", "name"]);
        assert_eq!(issues[1].message, "name is required");
        assert_eq!(issues[0].value.as_deref(), Some("0"));
    }

    #[test]
    fn coded_payload_serializes_without_empty_details() {
        let payload = ErrorPayload::from_code("BRANCH_NOT_FOUND", "Branch with id=9 not found", None);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["code"], "BRANCH_NOT_FOUND");
        assert!(json.get("details").is_none());
        assert_eq!(json["validationErrors"], serde_json::json!([]));
        assert!(json["timestamp"].is_string());
    }
}
