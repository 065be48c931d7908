//! Villa field validation shared by create and update.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::{Money, MAX_MONEY, MONEY_SCALE};

/// Highest rating a villa can carry.
pub const MAX_RATING: f64 = 5.0;

/// Validate that `1 <= base_capacity <= maximum_capacity`.
pub fn validate_capacity(base_capacity: i32, maximum_capacity: i32) -> Result<(), CoreError> {
    if base_capacity < 1 {
        return Err(CoreError::Validation(format!(
            "base_capacity must be at least 1, got {base_capacity}"
        )));
    }
    if base_capacity > maximum_capacity {
        return Err(CoreError::Validation(format!(
            "base_capacity ({base_capacity}) must not exceed maximum_capacity ({maximum_capacity})"
        )));
    }
    Ok(())
}

/// Validate that a price is not negative and fits a money column exactly.
pub fn validate_price(value: Money, name: &str) -> Result<(), CoreError> {
    if value < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(CoreError::Validation(format!(
            "{name} must have at most {MONEY_SCALE} decimal places, got {value}"
        )));
    }
    if value > MAX_MONEY {
        return Err(CoreError::Validation(format!(
            "{name} must not exceed {MAX_MONEY}, got {value}"
        )));
    }
    Ok(())
}

/// Validate that a rating falls within `[0.0, MAX_RATING]`.
pub fn validate_rating(rating: f64) -> Result<(), CoreError> {
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "rating must be between 0.0 and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

/// Validate that a floor area is strictly positive.
pub fn validate_area(area: f64) -> Result<(), CoreError> {
    if area.is_nan() || area <= 0.0 {
        return Err(CoreError::Validation(format!(
            "area must be greater than 0, got {area}"
        )));
    }
    Ok(())
}

pub fn validate_bed_count(bed_count: i32) -> Result<(), CoreError> {
    if bed_count < 0 {
        return Err(CoreError::Validation(format!(
            "bed_count must not be negative, got {bed_count}"
        )));
    }
    Ok(())
}

/// Validate that a text field is not blank.
pub fn validate_required_text(value: &str, name: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} must not be empty")));
    }
    Ok(())
}
