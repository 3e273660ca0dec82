//! Branch DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::BranchDetails;
use crate::domain::{Branch, BranchStats, BranchSummary, NewBranch};
use crate::interfaces::http::modules::employees::EmployeeDto;
use crate::interfaces::http::modules::vehicles::VehicleDto;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
}

impl From<Branch> for BranchDto {
    fn from(b: Branch) -> Self {
        Self {
            id: b.id,
            name: b.name,
            address: b.address,
            city: b.city,
            state: b.state,
            postal_code: b.postal_code,
        }
    }
}

/// Branch reference embedded in employee and vehicle responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchSummaryDto {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
}

impl From<BranchSummary> for BranchSummaryDto {
    fn from(b: BranchSummary) -> Self {
        Self {
            id: b.id,
            name: b.name,
            city: b.city,
            state: b.state,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchStatsDto {
    pub total_employees: u64,
    pub total_vehicles: u64,
}

impl From<BranchStats> for BranchStatsDto {
    fn from(s: BranchStats) -> Self {
        Self {
            total_employees: s.total_employees,
            total_vehicles: s.total_vehicles,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchDetailsDto {
    #[serde(flatten)]
    pub branch: BranchDto,
    pub employees: Vec<EmployeeDto>,
    pub vehicles: Vec<VehicleDto>,
    pub stats: BranchStatsDto,
}

impl From<BranchDetails> for BranchDetailsDto {
    fn from(d: BranchDetails) -> Self {
        Self {
            branch: d.branch.into(),
            employees: d.employees.into_iter().map(EmployeeDto::from).collect(),
            vehicles: d.vehicles.into_iter().map(VehicleDto::from).collect(),
            stats: d.stats.into(),
        }
    }
}

/// Body of `POST` and `PUT` requests
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchRequest {
    #[validate(length(min = 1, max = 100, message = "name is required and must be at most 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "address is required and must be at most 200 characters"))]
    pub address: String,
    #[validate(length(min = 1, max = 80, message = "city is required and must be at most 80 characters"))]
    pub city: String,
    /// Two upper-case letters, e.g. `SP`
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    /// `00000-000` or `00000000`
    #[validate(custom(function = "validate_postal_code"))]
    pub postal_code: Option<String>,
}

impl From<BranchRequest> for NewBranch {
    fn from(r: BranchRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
            city: r.city,
            state: r.state,
            postal_code: r.postal_code,
        }
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    if state.len() == 2 && state.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(invalid("state", "state must be two upper-case letters"))
    }
}

fn validate_postal_code(code: &str) -> Result<(), ValidationError> {
    let digits = |s: &str, n: usize| s.len() == n && s.chars().all(|c| c.is_ascii_digit());
    let valid = match code.split_once('-') {
        Some((head, tail)) => digits(head, 5) && digits(tail, 3),
        None => digits(code, 8),
    };
    if valid {
        Ok(())
    } else {
        Err(invalid("postal_code", "postalCode must look like 00000-000 or 00000000"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(state: &str, postal_code: Option<&str>) -> BranchRequest {
        BranchRequest {
            name: "Centro".into(),
            address: "Praça da Sé, 1".into(),
            city: "São Paulo".into(),
            state: state.into(),
            postal_code: postal_code.map(Into::into),
        }
    }

    #[test]
    fn accepts_both_postal_code_layouts() {
        assert!(request("SP", Some("01001-000")).validate().is_ok());
        assert!(request("SP", Some("01001000")).validate().is_ok());
        assert!(request("SP", None).validate().is_ok());
    }

    #[test]
    fn rejects_bad_state_and_postal_code() {
        let errors = request("sp", Some("0100-1000")).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("state"));
        assert!(fields.contains_key("postal_code"));
        assert!(request("SPX", None).validate().is_err());
    }
}
