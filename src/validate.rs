//! Field validation
//!
//! Per-field synchronous validators shared by the services and the API
//! layer. Unlike advisory form feedback, these run inside the mutation
//! path, so a caller cannot reach the store with invalid data by skipping
//! the form.
//!
//! Async uniqueness checks (category name, location department) live on the
//! catalog service, which owns the data they compare against.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

/// A single field failing validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Result type alias for validators
pub type ValidationResult = Result<(), ValidationError>;

/// Trimmed length must fall in `min..=max`
pub fn length(field: &'static str, value: &str, min: usize, max: usize) -> ValidationResult {
    let len = value.trim().chars().count();
    if len < min {
        return Err(ValidationError::new(
            field,
            format!("must be at least {} characters", min),
        ));
    }
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(())
}

/// Basic email shape: local part, `@`, domain with a dot
pub fn email(field: &'static str, value: &str) -> ValidationResult {
    let re = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|e| ValidationError::new(field, format!("invalid pattern: {}", e)))?;
    if !re.is_match(value.trim()) {
        return Err(ValidationError::new(field, "is not a valid email address"));
    }
    Ok(())
}

/// Phone numbers: optional leading `+`, then 7 to 15 digits
pub fn phone(field: &'static str, value: &str) -> ValidationResult {
    let re = regex::Regex::new(r"^\+?\d{7,15}$")
        .map_err(|e| ValidationError::new(field, format!("invalid pattern: {}", e)))?;
    if !re.is_match(value.trim()) {
        return Err(ValidationError::new(field, "is not a valid phone number"));
    }
    Ok(())
}

/// The birth date must put the person at or above `years` today
pub fn min_age(field: &'static str, birth_date: NaiveDate, years: u32) -> ValidationResult {
    let today = Utc::now().date_naive();
    match today.years_since(birth_date) {
        Some(age) if age >= years => Ok(()),
        _ => Err(ValidationError::new(
            field,
            format!("must be at least {} years old", years),
        )),
    }
}

/// Password strength: at least 8 characters with upper case, lower case and
/// a digit
pub fn password_strength(field: &'static str, value: &str) -> ValidationResult {
    if value.chars().count() < 8 {
        return Err(ValidationError::new(
            field,
            "must be at least 8 characters",
        ));
    }
    let has_upper = value.chars().any(|c| c.is_uppercase());
    let has_lower = value.chars().any(|c| c.is_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        return Err(ValidationError::new(
            field,
            "must mix upper case, lower case and digits",
        ));
    }
    Ok(())
}

/// Counts and prices must be strictly positive
pub fn positive(field: &'static str, value: u64) -> ValidationResult {
    if value == 0 {
        return Err(ValidationError::new(field, "must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert!(length("name", "Casa", 3, 50).is_ok());
        assert!(length("name", "  Casa  ", 3, 50).is_ok());
        assert!(length("name", "Ca", 3, 50).is_err());
        assert!(length("name", &"x".repeat(51), 3, 50).is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(email("email", "ana@example.com").is_ok());
        assert!(email("email", " ana@example.com ").is_ok());
        assert!(email("email", "ana@example").is_err());
        assert!(email("email", "ana example.com").is_err());
        assert!(email("email", "@example.com").is_err());
    }

    #[test]
    fn test_phone_shapes() {
        assert!(phone("phone", "3001234567").is_ok());
        assert!(phone("phone", "+573001234567").is_ok());
        assert!(phone("phone", "12345").is_err());
        assert!(phone("phone", "300-123-4567").is_err());
    }

    #[test]
    fn test_min_age() {
        let today = Utc::now().date_naive();
        let adult = today - chrono::Duration::days(19 * 365);
        let minor = today - chrono::Duration::days(10 * 365);
        assert!(min_age("birth_date", adult, 18).is_ok());
        assert!(min_age("birth_date", minor, 18).is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(password_strength("password", "Secreto1").is_ok());
        assert!(password_strength("password", "short1A").is_err());
        assert!(password_strength("password", "alllowercase1").is_err());
        assert!(password_strength("password", "ALLUPPERCASE1").is_err());
        assert!(password_strength("password", "NoDigitsHere").is_err());
    }

    #[test]
    fn test_positive() {
        assert!(positive("price", 1).is_ok());
        assert!(positive("price", 0).is_err());
    }

    #[test]
    fn test_error_display_names_field() {
        let err = length("name", "", 3, 50).unwrap_err();
        assert_eq!(err.to_string(), "name: must be at least 3 characters");
    }
}
