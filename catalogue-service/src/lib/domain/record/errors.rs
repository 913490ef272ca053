use thiserror::Error;

/// Error for RecordName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordNameError {
    #[error("Record name is empty")]
    Empty,

    #[error("Record name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Genre validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenreError {
    #[error("Genre is empty")]
    Empty,

    #[error("Genre too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for ReleaseYear validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReleaseYearError {
    #[error("Year must be a positive integer, got {0}")]
    NotPositive(i32),
}

/// Top-level error for all record operations
#[derive(Debug, Clone, Error)]
pub enum RecordError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid record name: {0}")]
    InvalidName(#[from] RecordNameError),

    #[error("Invalid genre: {0}")]
    InvalidGenre(#[from] GenreError),

    #[error("Invalid year: {0}")]
    InvalidYear(#[from] ReleaseYearError),

    // Domain-level errors
    #[error("Record not found: {name} ({year})")]
    NotFound { name: String, year: i32 },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
