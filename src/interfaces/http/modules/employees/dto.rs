//! Employee DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Employee, NewEmployee};
use crate::interfaces::http::modules::branches::BranchSummaryDto;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub branch_id: i32,
    pub role: String,
    pub branch: Option<BranchSummaryDto>,
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            branch_id: e.branch_id,
            role: e.role,
            branch: e.branch.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "name is required and must be at most 100 characters"))]
    pub name: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 150, message = "email must be at most 150 characters")
    )]
    pub email: String,
    #[validate(range(min = 1, message = "branchId must be a positive id"))]
    pub branch_id: i32,
    #[validate(length(min = 1, max = 80, message = "role is required and must be at most 80 characters"))]
    pub role: String,
}

impl From<EmployeeRequest> for NewEmployee {
    fn from(r: EmployeeRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            branch_id: r.branch_id,
            role: r.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_email_and_branch_are_reported() {
        let request = EmployeeRequest {
            name: "Rafa".into(),
            email: "not-an-email".into(),
            branch_id: 0,
            role: "Driver".into(),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("branch_id"));
        assert!(!fields.contains_key("name"));
    }
}
