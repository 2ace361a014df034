//! Signup input validation

use thiserror::Error;

/// Errors that can occur during signup validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),
}

/// Validate a signup submission
///
/// Every field must be present and non-empty. No format validation is applied
/// beyond that; uniqueness is the repository's concern.
pub fn validate_signup(
    name: &str,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), SignupValidationError> {
    for (field, value) in [
        ("name", name),
        ("username", username),
        ("email", email),
        ("password", password),
    ] {
        if value.is_empty() {
            return Err(SignupValidationError::MissingField(field));
        }
    }

    Ok(())
}
