use thiserror::Error;

use crate::credential::errors::AuthorizationError;

/// Error for record field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordFieldError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Year must be a positive integer, got {0}")]
    YearNotPositive(i32),
}

/// Top-level error for record operations routed through the authority
#[derive(Debug, Clone, Error)]
pub enum RecordError {
    #[error(transparent)]
    Unauthorized(#[from] AuthorizationError),

    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("Invalid record: {0}")]
    InvalidField(#[from] RecordFieldError),

    #[error("Record not found: {0}")]
    NotFound(String),

    // Catalogue failures
    #[error("Catalogue unreachable: {0}")]
    DownstreamUnavailable(String),

    #[error("Catalogue store failure: {0}")]
    StoreError(String),
}
