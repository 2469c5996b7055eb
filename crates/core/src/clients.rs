//! Client contact validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length for a client's first or last name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for free-form client notes.
pub const MAX_NOTES_LENGTH: usize = 5_000;

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 20;

/// Optional leading `+`, then digits with spaces, dashes, dots or parentheses.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-.]+$").expect("phone pattern is valid"));

/// Validate a client name component (first or last name).
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a phone number's shape and digit count.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if !PHONE_RE.is_match(phone) {
        return Err(CoreError::Validation(format!(
            "Invalid phone number '{phone}'"
        )));
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(CoreError::Validation(format!(
            "Phone number must contain between {MIN_PHONE_DIGITS} and {MAX_PHONE_DIGITS} digits"
        )));
    }

    Ok(())
}

/// Validate notes length.
pub fn validate_notes(notes: &str) -> Result<(), CoreError> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(CoreError::Validation(format!(
            "Notes must be at most {MAX_NOTES_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Turn a user search term into an `ILIKE` pattern, escaping wildcards.
/// Blank terms yield `None`.
pub fn search_pattern(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return None;
    }

    let escaped: String = trimmed
        .chars()
        .flat_map(|c| match c {
            '%' | '_' | '\\' => vec!['\\', c],
            _ => vec![c],
        })
        .collect();

    Some(format!("%{escaped}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_phone_formats() {
        assert!(validate_phone("+44 20 7946 0958").is_ok());
        assert!(validate_phone("(555) 123-4567").is_ok());
        assert!(validate_phone("0612.34.56.78").is_ok());
    }

    #[test]
    fn rejects_letters_in_phone() {
        assert!(validate_phone("555-CALL-NOW").is_err());
    }

    #[test]
    fn rejects_too_few_digits() {
        let err = validate_phone("12-34").unwrap_err();
        assert!(err.to_string().contains("between 7 and 20 digits"));
    }

    #[test]
    fn rejects_plus_in_the_middle() {
        assert!(validate_phone("555+1234567").is_err());
    }

    #[test]
    fn blank_name_rejected() {
        assert!(validate_name("first_name", "   ").is_err());
        assert!(validate_name("first_name", "Maya").is_ok());
    }

    #[test]
    fn long_name_rejected() {
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name("last_name", &long).is_err());
    }

    #[test]
    fn notes_length_limit() {
        assert!(validate_notes(&"n".repeat(MAX_NOTES_LENGTH)).is_ok());
        assert!(validate_notes(&"n".repeat(MAX_NOTES_LENGTH + 1)).is_err());
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern("  ann "), Some("%ann%".to_string()));
        assert_eq!(search_pattern("50%_off"), Some("%50\\%\\_off%".to_string()));
        assert_eq!(search_pattern("   "), None);
    }
}
