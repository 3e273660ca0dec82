//! Vehicle DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::{NewVehicle, Vehicle};
use crate::interfaces::http::modules::branches::BranchSummaryDto;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub branch_id: i32,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub branch: Option<BranchSummaryDto>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            brand: v.brand,
            model: v.model,
            year: v.year,
            plate: v.plate,
            branch_id: v.branch_id,
            color: v.color,
            mileage: v.mileage,
            branch: v.branch.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    #[validate(length(min = 1, max = 50, message = "brand is required and must be at most 50 characters"))]
    pub brand: String,
    #[validate(length(min = 1, max = 80, message = "model is required and must be at most 80 characters"))]
    pub model: String,
    #[validate(range(min = 1900, max = 2030, message = "year must be between 1900 and 2030"))]
    pub year: i32,
    /// `AAA-9999` (legacy) or `AAA9A99` (Mercosul)
    #[validate(custom(function = "validate_plate"))]
    pub plate: String,
    #[validate(range(min = 1, message = "branchId must be a positive id"))]
    pub branch_id: i32,
    #[validate(length(max = 30, message = "color must be at most 30 characters"))]
    pub color: Option<String>,
    #[validate(range(min = 0, message = "mileage must not be negative"))]
    pub mileage: Option<i64>,
}

impl From<VehicleRequest> for NewVehicle {
    fn from(r: VehicleRequest) -> Self {
        Self {
            brand: r.brand,
            model: r.model,
            year: r.year,
            plate: r.plate,
            branch_id: r.branch_id,
            color: r.color,
            mileage: r.mileage,
        }
    }
}

/// Inclusive mileage bounds for `GET /vehicles/mileage`.
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MileageParams {
    #[validate(range(min = 0, message = "min must not be negative"))]
    pub min: i64,
    #[validate(range(min = 0, message = "max must not be negative"))]
    pub max: i64,
}

fn validate_plate(plate: &str) -> Result<(), ValidationError> {
    let b = plate.as_bytes();
    let letters = |s: &[u8]| s.iter().all(u8::is_ascii_uppercase);
    let digits = |s: &[u8]| s.iter().all(u8::is_ascii_digit);

    let valid = match b.len() {
        8 => letters(&b[..3]) && b[3] == b'-' && digits(&b[4..]),
        7 => letters(&b[..3]) && digits(&b[3..4]) && letters(&b[4..5]) && digits(&b[5..]),
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("plate");
        err.message = Some("plate must look like AAA-9999 or AAA9A99".into());
        Err(err)
    }
}
