//! Field validators shared by the typed inputs.
//!
//! Each returns the cleaned value or a `Validation` error naming the field.

use crate::common::{DirectoryError, DirectoryResult};

/// Trimmed, required text between `min` and `max` characters.
pub fn required_text(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> DirectoryResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DirectoryError::validation(field, "is required"));
    }
    let len = value.chars().count();
    if len < min || len > max {
        return Err(DirectoryError::validation(
            field,
            format!("must be between {} and {} characters", min, max),
        ));
    }
    Ok(value.to_string())
}

/// Trimmed optional text of at most `max` characters. Blank becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> DirectoryResult<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > max {
        return Err(DirectoryError::validation(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(Some(value.to_string()))
}

/// Optional absolute http(s) URL.
pub fn optional_url(field: &'static str, value: Option<&str>) -> DirectoryResult<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(Some(value.to_string())),
        _ => Err(DirectoryError::validation(field, "must be a valid http(s) URL")),
    }
}
