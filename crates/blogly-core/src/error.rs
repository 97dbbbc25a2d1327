//! Domain-level error types.

use thiserror::Error;

use crate::domain::Id;

/// Domain errors - business logic failures surfaced to the boundary layer.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Id },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Broken reference: {0}")]
    Referential(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: &'static str, id: Id },

    #[error("Unique constraint violated: {0}")]
    Duplicate(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKey(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity_type, id } => DomainError::NotFound { entity_type, id },
            RepoError::Duplicate(msg) => DomainError::Duplicate(msg),
            RepoError::ForeignKey(msg) => DomainError::Referential(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
