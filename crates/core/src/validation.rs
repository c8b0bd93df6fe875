//! Form validation shared by the signup, profile and job-posting views.
//!
//! All checks run before any data source call so that invalid input is
//! reported inline and never reaches the network or the stub.

use crate::error::CoreError;

/// Message shown when the signup confirmation does not match.
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Ensure a form field is present and not just whitespace.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Minimal structural email check: one `@` with a non-empty local part and
/// a dotted domain.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

/// Ensure the signup password and its confirmation are identical.
pub fn validate_password_match(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password != confirmation {
        return Err(CoreError::Validation(PASSWORD_MISMATCH.to_string()));
    }
    Ok(())
}
