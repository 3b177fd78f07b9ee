use thiserror::Error;
use validator::ValidationErrors;

use crate::forms::comments::CommentFormError;
use crate::forms::products::ProductFormError;
use crate::repository::RepositoryError;

pub mod auth;
pub mod comments;
pub mod products;

/// Result type returned by all service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer, mapped onto HTTP by the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,
    /// The requester is not allowed to perform the operation.
    #[error("{0}")]
    Forbidden(String),
    /// The target record does not exist.
    #[error("not found")]
    NotFound,
    /// The operation conflicts with an existing record.
    #[error("conflict")]
    Conflict,
    /// Field-level validation failures.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    /// A payload failure without field resolution.
    #[error("{0}")]
    Form(String),
    /// Persistence failure other than not-found.
    #[error(transparent)]
    Repository(RepositoryError),
    /// Anything else that should surface as a 500.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            // Check-then-insert flows can still lose the race to a UNIQUE
            // index; surface that as a conflict, not a server error.
            RepositoryError::Database(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            )) => ServiceError::Conflict,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(err: ProductFormError) -> Self {
        match err {
            ProductFormError::Validation(errors) => ServiceError::Validation(errors),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

impl From<CommentFormError> for ServiceError {
    fn from(err: CommentFormError) -> Self {
        match err {
            CommentFormError::Validation(errors) => ServiceError::Validation(errors),
            other => ServiceError::Form(other.to_string()),
        }
    }
}
