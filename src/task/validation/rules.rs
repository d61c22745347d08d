//! Individual validation rules for task requests.
//!
//! Each rule is a pure function over a single field. Rules return `Ok(())`
//! on success or the specific `ValidationError` on failure.

use crate::task::ports::{TaskValidationConfig, ValidationError};

/// Field name reported for title violations.
pub const TITLE_FIELD: &str = "title";

/// Field name reported for description violations.
pub const DESCRIPTION_FIELD: &str = "description";

/// Validates that the title is non-empty after trimming.
///
/// # Errors
///
/// Returns `ValidationError::Empty` for blank titles.
pub fn validate_title_present(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::Empty { field: TITLE_FIELD });
    }
    Ok(())
}

/// Validates that the title fits the configured length.
///
/// # Errors
///
/// Returns `ValidationError::TooLong` when the limit is exceeded.
pub fn validate_title_length(
    title: &str,
    config: &TaskValidationConfig,
) -> Result<(), ValidationError> {
    validate_length(TITLE_FIELD, title, config.max_title_length)
}

/// Validates that the description, when present, fits the configured
/// length.
///
/// # Errors
///
/// Returns `ValidationError::TooLong` when the limit is exceeded.
pub fn validate_description_length(
    description: Option<&str>,
    config: &TaskValidationConfig,
) -> Result<(), ValidationError> {
    description.map_or(Ok(()), |text| {
        validate_length(DESCRIPTION_FIELD, text, config.max_description_length)
    })
}

fn validate_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}
