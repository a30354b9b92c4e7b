//! Business operations sitting between the HTTP routes and the repository.

use thiserror::Error;
use validator::ValidationErrors;

pub mod customer;

/// Outcome of a failed service call, independent of the transport.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input was rejected as a whole (duplicate email, constraint violation).
    #[error("{0}")]
    Validation(String),

    /// Input was rejected field by field.
    #[error("invalid fields: {0}")]
    InvalidFields(#[from] ValidationErrors),

    #[error("customer not found")]
    NotFound,

    /// Store failure that is not the caller's fault.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
