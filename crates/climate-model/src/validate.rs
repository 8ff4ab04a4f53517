//! Client-side input validation
//!
//! Runs before any request is built; failures never reach the transport.

use crate::wire::FootprintRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit sent when the caller does not name one
pub const DEFAULT_UNIT: &str = "unit";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a location")]
    EmptyLocation,
    #[error("Latitude out of range: {0}")]
    InvalidLatitude(f64),
    #[error("Longitude out of range: {0}")]
    InvalidLongitude(f64),
    #[error("Forecast horizon must be at least one year")]
    InvalidYears,
    #[error("Please fill all fields: missing {0}")]
    MissingField(&'static str),
    #[error("Amount must be a positive number: {0}")]
    InvalidAmount(f64),
    #[error("Please complete a risk assessment first")]
    NoAssessment,
}

pub type Result<T> = std::result::Result<T, ValidationError>;

fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && lat.is_finite()
}

fn is_valid_longitude(lon: f64) -> bool {
    (-180.0..=180.0).contains(&lon) && lon.is_finite()
}

/// Trimmed, non-empty location
pub fn validate_location(location: &str) -> Result<String> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyLocation);
    }
    Ok(trimmed.to_string())
}

pub fn validate_coordinates(lat: f64, lon: f64) -> Result<()> {
    if !is_valid_latitude(lat) {
        return Err(ValidationError::InvalidLatitude(lat));
    }
    if !is_valid_longitude(lon) {
        return Err(ValidationError::InvalidLongitude(lon));
    }
    Ok(())
}

pub fn validate_years(years: u32) -> Result<()> {
    if years == 0 {
        return Err(ValidationError::InvalidYears);
    }
    Ok(())
}

/// One logged carbon-footprint activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintActivity {
    pub category: String,
    pub activity_type: String,
    pub amount: f64,
    pub unit: Option<String>,
}

impl FootprintActivity {
    pub fn new(category: impl Into<String>, activity_type: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            activity_type: activity_type.into(),
            amount,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        if self.activity_type.trim().is_empty() {
            return Err(ValidationError::MissingField("activity_type"));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::InvalidAmount(self.amount));
        }
        Ok(())
    }

    /// Validated request body for `POST /footprint/calculate`
    pub fn into_request(self, user_id: &str) -> Result<FootprintRequest> {
        self.validate()?;
        Ok(FootprintRequest {
            user_id: user_id.to_string(),
            category: self.category.trim().to_string(),
            activity_type: self.activity_type.trim().to_string(),
            amount: self.amount,
            unit: self
                .unit
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_trimmed() {
        assert_eq!(validate_location("  Lagos ").unwrap(), "Lagos");
        assert_eq!(validate_location("   "), Err(ValidationError::EmptyLocation));
    }

    #[test]
    fn test_coordinate_ranges() {
        assert!(validate_coordinates(40.7128, -74.006).is_ok());
        assert_eq!(
            validate_coordinates(91.0, 0.0),
            Err(ValidationError::InvalidLatitude(91.0))
        );
        assert!(validate_coordinates(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_years_must_be_positive() {
        assert!(validate_years(10).is_ok());
        assert_eq!(validate_years(0), Err(ValidationError::InvalidYears));
    }

    #[test]
    fn test_footprint_activity_validation() {
        assert!(FootprintActivity::new("food", "beef", 2.0).validate().is_ok());
        assert_eq!(
            FootprintActivity::new("", "beef", 2.0).validate(),
            Err(ValidationError::MissingField("category"))
        );
        assert_eq!(
            FootprintActivity::new("food", "beef", 0.0).validate(),
            Err(ValidationError::InvalidAmount(0.0))
        );
    }

    #[test]
    fn test_footprint_request_defaults_unit() {
        let req = FootprintActivity::new("energy", "electricity", 120.0)
            .into_request("user_9")
            .unwrap();
        assert_eq!(req.unit, "unit");
        assert_eq!(req.user_id, "user_9");

        let req = FootprintActivity::new("energy", "electricity", 120.0)
            .with_unit("kWh")
            .into_request("user_9")
            .unwrap();
        assert_eq!(req.unit, "kWh");
    }
}
