//! Service catalog validation.

use crate::error::CoreError;
use crate::types::Price;

/// Longest bookable service, in minutes.
pub const MAX_SERVICE_DURATION_MINS: i32 = 24 * 60;

/// Maximum length for a service name.
pub const MAX_SERVICE_NAME_LENGTH: usize = 200;

pub fn validate_service_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Service name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_SERVICE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Service name must be at most {MAX_SERVICE_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_price(price: Price) -> Result<(), CoreError> {
    if price < 0 {
        return Err(CoreError::Validation(format!(
            "Price must not be negative, got {price}"
        )));
    }
    Ok(())
}

/// A missing duration is allowed; the booking layout falls back to its default.
pub fn validate_duration(duration_mins: Option<i32>) -> Result<(), CoreError> {
    match duration_mins {
        Some(mins) if !(1..=MAX_SERVICE_DURATION_MINS).contains(&mins) => {
            Err(CoreError::Validation(format!(
                "Duration must be between 1 and {MAX_SERVICE_DURATION_MINS} minutes, got {mins}"
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_rejected() {
        assert!(validate_price(-1).is_err());
        assert!(validate_price(0).is_ok());
    }

    #[test]
    fn duration_bounds() {
        assert!(validate_duration(None).is_ok());
        assert!(validate_duration(Some(1)).is_ok());
        assert!(validate_duration(Some(MAX_SERVICE_DURATION_MINS)).is_ok());
        assert!(validate_duration(Some(0)).is_err());
        assert!(validate_duration(Some(MAX_SERVICE_DURATION_MINS + 1)).is_err());
    }

    #[test]
    fn service_name_required() {
        assert!(validate_service_name("").is_err());
        assert!(validate_service_name("Balayage").is_ok());
    }
}
