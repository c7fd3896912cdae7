//! Request DTOs for the vehicle API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::{Datelike, Utc};
use serde::Deserialize;

use super::vehicle::MIN_MODEL_YEAR;

/// Maximum brand/model length in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// Request body for POST /api/v1/vehicles
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicleRequest {
    pub brand: String,
    pub model: String,
    pub year: i32,
}

impl CreateVehicleRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_name("brand", &self.brand, true)
            .or_else(|| validate_name("model", &self.model, true))
            .or_else(|| validate_year(self.year))
    }
}

/// Request body for PATCH /api/v1/vehicles/:id
///
/// Every field is optional; empty strings and a zero year mean "unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVehicleRequest {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: i32,
}

impl UpdateVehicleRequest {
    /// Validates the fields that are present.
    pub fn validate(&self) -> Option<String> {
        if !self.brand.is_empty() {
            if let Some(msg) = validate_name("brand", &self.brand, false) {
                return Some(msg);
            }
        }
        if !self.model.is_empty() {
            if let Some(msg) = validate_name("model", &self.model, false) {
                return Some(msg);
            }
        }
        if self.year != 0 {
            return validate_year(self.year);
        }
        None
    }
}

// Only letters are accepted on create; updates allow any printable text.
fn validate_name(field: &str, value: &str, letters_only: bool) -> Option<String> {
    let len = value.chars().count();
    if len == 0 {
        return Some(format!("{} is required", field));
    }
    if len > MAX_NAME_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_NAME_LENGTH
        ));
    }
    if letters_only && !value.chars().all(char::is_alphabetic) {
        return Some(format!("{} must contain only letters", field));
    }
    None
}

fn validate_year(year: i32) -> Option<String> {
    let max_year = Utc::now().year() + 1;
    if year < MIN_MODEL_YEAR || year > max_year {
        return Some(format!(
            "year {} invalid, must be between {} and {}",
            year, MIN_MODEL_YEAR, max_year
        ));
    }
    None
}
