//! Vehicle domain entity

use crate::domain::branch::BranchSummary;
use crate::shared::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Upper-case, `AAA-9999` or `AAA9A99`; unique across the fleet
    pub plate: String,
    pub branch_id: i32,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub branch: Option<BranchSummary>,
}

impl Vehicle {
    pub fn branch_name(&self) -> Option<&str> {
        self.branch.as_ref().map(|b| b.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub branch_id: i32,
    pub color: Option<String>,
    pub mileage: Option<i64>,
}

/// Inclusive mileage bounds, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MileageRange {
    min: i64,
    max: i64,
}

impl MileageRange {
    pub fn new(min: i64, max: i64) -> DomainResult<Self> {
        if min < 0 || max < 0 {
            return Err(DomainError::validation("min", "Mileage bounds must not be negative"));
        }
        if min > max {
            return Err(DomainError::validation("min", "min must be less than or equal to max"));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Vehicles without a recorded mileage never match.
    pub fn contains(&self, mileage: Option<i64>) -> bool {
        mileage.is_some_and(|m| (self.min..=self.max).contains(&m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mileage_range_rejects_inverted_bounds() {
        assert!(MileageRange::new(10, 5).is_err());
        assert!(MileageRange::new(-1, 5).is_err());
        let range = MileageRange::new(0, 5000).unwrap();
        assert!(range.contains(Some(5000)));
        assert!(!range.contains(Some(5001)));
        assert!(!range.contains(None));
    }
}
