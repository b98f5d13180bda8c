//! DirectoryError to GraphQL error mapping.

use juniper::{FieldError, IntoFieldError, Object, Value};
use tracing::error;

use crate::common::DirectoryError;

/// Build a `FieldError` carrying `extensions.code` (and `extensions.field`
/// for validation failures).
pub fn error_with_code(message: impl Into<String>, code: &str, field: Option<&str>) -> FieldError {
    let message: String = message.into();
    let mut extensions = Object::with_capacity(2);
    extensions.add_field("code", Value::scalar(code.to_string()));
    if let Some(field) = field {
        extensions.add_field("field", Value::scalar(field.to_string()));
    }
    FieldError::new(message, Value::Object(extensions))
}

impl IntoFieldError for DirectoryError {
    fn into_field_error(self) -> FieldError {
        match &self {
            DirectoryError::Validation { field, message } => {
                error_with_code(message.clone(), self.code(), Some(*field))
            }
            DirectoryError::Storage(e) => {
                error!(error = %e, "Storage error");
                error_with_code("Internal storage error", self.code(), None)
            }
            _ => error_with_code(self.to_string(), self.code(), None),
        }
    }
}

/// Resolver-side conversion. `?` alone would pick juniper's `Display`
/// conversion and lose the extensions.
pub fn directory_error(err: DirectoryError) -> FieldError {
    err.into_field_error()
}

/// For model reads that return bare `sqlx` errors.
pub fn storage_error(err: sqlx::Error) -> FieldError {
    directory_error(DirectoryError::Storage(err))
}
