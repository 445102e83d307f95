// src/validation.rs
// Field rules shared by the account and content endpoints

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PortalError, PortalResult};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Trimmed value of a required text field, or a validation error naming it.
pub fn required(value: &str, message: &str) -> PortalResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PortalError::validation(message));
    }
    Ok(trimmed.to_string())
}

/// Lowercased, trimmed email address.
pub fn email(value: &str) -> PortalResult<String> {
    let normalized = value.trim().to_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(PortalError::validation("Please include a valid email"));
    }
    Ok(normalized)
}

pub fn password(value: &str) -> PortalResult<()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(PortalError::validation(format!(
            "Please enter a password with {MIN_PASSWORD_LEN} or more characters"
        )));
    }
    Ok(())
}

/// `None` for absent or blank optional fields, trimmed text otherwise.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
