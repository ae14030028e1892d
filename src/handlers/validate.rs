//! Shape checks shared by the handlers. Each returns a field-level
//! validation error the client can attach to a form field.

use crate::auth::password::MIN_PASSWORD_LENGTH;
use crate::database::models::enrollment::ENROLLMENT_STATUSES;
use crate::error::ApiError;

/// Basic email validation for registration and user management.
pub fn validate_email_format(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format".to_string());
    }
    if !parts[1].contains('.') || parts[1].starts_with('.') || parts[1].ends_with('.') {
        return Err("Invalid email format".to_string());
    }
    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), ApiError> {
    validate_email_format(value).map_err(|msg| ApiError::field_error(field, msg))
}

pub fn optional_email(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    match value {
        Some(value) => email(field, value),
        None => Ok(()),
    }
}

pub fn password(field: &str, value: &str) -> Result<(), ApiError> {
    if value.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::field_error(
            field,
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}

pub fn required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::field_error(field, format!("{} is required", field)));
    }
    Ok(())
}

/// Like [`required`], for fields that may be omitted on update but not blanked.
pub fn not_blank(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    match value {
        Some(value) => required(field, value),
        None => Ok(()),
    }
}

pub fn capacity(value: Option<i32>) -> Result<(), ApiError> {
    match value {
        Some(capacity) if capacity <= 0 => Err(ApiError::field_error("capacity", "Capacity must be positive")),
        _ => Ok(()),
    }
}

pub fn enrollment_status(value: Option<&str>) -> Result<(), ApiError> {
    match value {
        Some(status) if !ENROLLMENT_STATUSES.contains(&status) => Err(ApiError::field_error(
            "status",
            format!("Status must be one of: {}", ENROLLMENT_STATUSES.join(", ")),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(validate_email_format("ada@school.org").is_ok());
        assert!(validate_email_format("").is_err());
        assert!(validate_email_format("ada").is_err());
        assert!(validate_email_format("ada@school").is_err());
        assert!(validate_email_format("@school.org").is_err());
        assert!(validate_email_format("a@b@school.org").is_err());
        assert!(validate_email_format("ada lovelace@school.org").is_err());
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(password("password", "short").is_err());
        assert!(password("password", "long enough").is_ok());
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let err = required("name", "   ").unwrap_err();
        assert_eq!(err.to_json()["field_errors"]["name"], "name is required");
        assert!(not_blank("name", None).is_ok());
    }

    #[test]
    fn capacity_and_status() {
        assert!(capacity(Some(0)).is_err());
        assert!(capacity(Some(30)).is_ok());
        assert!(capacity(None).is_ok());
        assert!(enrollment_status(Some("active")).is_ok());
        assert!(enrollment_status(Some("paused")).is_err());
        assert!(enrollment_status(None).is_ok());
    }
}
