//! Input validation helpers
//!
//! Centralized field constraints and validation functions. The limits mirror
//! what clients already rely on: display names 10-100 chars, usernames 4-100,
//! passwords at least 10, product names 3-100, prices 0.01-10000.

use crate::utils::AppError;

// ── Field limits ─────────────────────────────────────────────────────

/// Display name (full name) length bounds
pub const MIN_DISPLAY_NAME_LEN: usize = 10;
pub const MAX_DISPLAY_NAME_LEN: usize = 100;

/// Username length bounds
pub const MIN_USERNAME_LEN: usize = 4;
pub const MAX_USERNAME_LEN: usize = 100;

/// Minimum password length (before hashing)
pub const MIN_PASSWORD_LEN: usize = 10;

/// Product name length bounds
pub const MIN_PRODUCT_NAME_LEN: usize = 3;
pub const MAX_PRODUCT_NAME_LEN: usize = 100;

/// Product price bounds (inclusive)
pub const MIN_PRICE: f64 = 0.01;
pub const MAX_PRICE: f64 = 10_000.0;

// ── Validation helpers ───────────────────────────────────────────────

/// Validate that a required string's char count falls within `[min, max]`.
pub fn validate_text(value: &str, field: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::validation(format!(
            "{field} must be between {min} and {max} characters ({len} given)"
        )));
    }
    Ok(())
}

/// Validate an optional string, if present, against `[min, max]`.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    min: usize,
    max: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        validate_text(v, field, min, max)?;
    }
    Ok(())
}

/// Validate a product price: finite and within `[MIN_PRICE, MAX_PRICE]`.
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < MIN_PRICE || price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "price must be between {MIN_PRICE} and {MAX_PRICE}"
        )));
    }
    Ok(())
}

/// Validate an optional price, if present.
pub fn validate_optional_price(price: Option<f64>) -> Result<(), AppError> {
    if let Some(p) = price {
        validate_price(p)?;
    }
    Ok(())
}

/// Validate a new password and its confirmation field.
pub fn validate_password(password: &str, confirmation: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password != confirmation {
        return Err(AppError::validation(
            "password confirmation does not match",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_bounds_are_inclusive() {
        assert!(validate_text("abc", "name", 3, 100).is_ok());
        assert!(validate_text("ab", "name", 3, 100).is_err());
        assert!(validate_text(&"x".repeat(100), "name", 3, 100).is_ok());
        assert!(validate_text(&"x".repeat(101), "name", 3, 100).is_err());
    }

    #[test]
    fn price_bounds() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(10_000.0).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(10_000.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn password_confirmation_must_match() {
        assert!(validate_password("longenough1", "longenough1").is_ok());
        assert!(validate_password("longenough1", "different12").is_err());
        assert!(validate_password("short", "short").is_err());
    }
}
