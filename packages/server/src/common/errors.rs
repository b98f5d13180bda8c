use thiserror::Error;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failures surfaced by the submission, moderation and admin operations.
///
/// Everything except `Storage` is an expected, user-facing outcome and never
/// leaves partial writes behind.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{entity} already exists: {value}")]
    Duplicate { entity: &'static str, value: String },

    #[error("Cannot delete {entity}: {dependents} listing(s) still reference it")]
    Dependency { entity: &'static str, dependents: i64 },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl DirectoryError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            value: value.into(),
        }
    }

    /// Stable machine-readable code, used in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Duplicate { .. } => "DUPLICATE",
            Self::Dependency { .. } => "HAS_DEPENDENTS",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Converts a unique-constraint violation into `Duplicate`, leaving every
    /// other storage error untouched.
    pub fn from_insert(err: sqlx::Error, entity: &'static str, value: &str) -> Self {
        if is_unique_violation(&err) {
            Self::duplicate(entity, value)
        } else {
            Self::Storage(err)
        }
    }
}

/// True when the database rejected a write because of a UNIQUE or PRIMARY KEY
/// constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = DirectoryError::validation("invite_link", "must be a WhatsApp invite link");
        assert_eq!(
            err.to_string(),
            "invite_link: must be a WhatsApp invite link"
        );
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn non_database_errors_stay_storage_errors() {
        let err = DirectoryError::from_insert(sqlx::Error::RowNotFound, "listing", "x");
        assert!(matches!(err, DirectoryError::Storage(_)));
    }

    #[test]
    fn dependency_message_reports_count() {
        let err = DirectoryError::Dependency {
            entity: "category",
            dependents: 3,
        };
        assert!(err.to_string().contains("3 listing(s)"));
        assert_eq!(err.code(), "HAS_DEPENDENTS");
    }
}
