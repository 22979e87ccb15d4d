//! Domain-level error types.

use thiserror::Error;

use crate::ports::{AuthError, MediaError};

/// Domain errors - business logic failures.
///
/// The `Display` text is what API clients see in the `error` field.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found")]
    NotFound { entity_type: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("File type not allowed: {0}")]
    FileType(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("You are not the owner of this listing")]
    Forbidden,

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn listing_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Listing",
            id: id.into(),
        }
    }

    /// Builds the validation error for a set of absent fields.
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::Validation(format!("Missing required fields: {}", fields.join(", ")))
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "Record",
                id: String::new(),
            },
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired | AuthError::InvalidToken(_) => DomainError::Unauthorized,
            AuthError::HashingError(msg) => DomainError::Internal(msg),
        }
    }
}

impl From<MediaError> for DomainError {
    fn from(err: MediaError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = DomainError::missing_fields(&["title", "material"]);
        assert_eq!(err.to_string(), "Missing required fields: title, material");
    }

    #[test]
    fn test_repo_constraint_becomes_conflict() {
        let err: DomainError = RepoError::Constraint("Entity already exists".into()).into();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let err: DomainError = AuthError::TokenExpired.into();
        assert!(matches!(err, DomainError::Unauthorized));
    }
}
