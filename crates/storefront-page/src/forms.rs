//! Inline form field validation.

use storefront_core::{FieldKind, RenderCommand};
use thiserror::Error;

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("This field is required")]
    Required,
}

/// Validate a field value.
///
/// The value is trimmed first. Email fields are checked for shape before
/// the required check runs, so an empty email field reports
/// [`FieldError::InvalidEmail`].
pub fn validate_field(kind: FieldKind, required: bool, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if kind == FieldKind::Email && !is_valid_email(value) {
        return Err(FieldError::InvalidEmail);
    }
    if required && value.is_empty() {
        return Err(FieldError::Required);
    }
    Ok(())
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside
/// the domain with something on both sides.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Command to render after a field loses focus.
pub fn blur_command(field: &str, kind: FieldKind, required: bool, value: &str) -> RenderCommand {
    match validate_field(kind, required, value) {
        Ok(()) => RenderCommand::ClearFieldError {
            field: field.to_string(),
        },
        Err(e) => RenderCommand::FieldError {
            field: field.to_string(),
            message: e.to_string(),
        },
    }
}
