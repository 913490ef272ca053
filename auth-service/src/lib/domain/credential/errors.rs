use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is empty")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for plaintext password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordInputError {
    #[error("Password is empty")]
    Empty,
}

/// Top-level error for registration and login
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordInputError),

    // Domain-level errors
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Why a presented token was not accepted
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("No token provided")]
    Missing,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

impl From<auth::JwtError> for AuthorizationError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::Expired => AuthorizationError::Expired,
            auth::JwtError::Malformed(_) | auth::JwtError::EncodingFailed(_) => {
                AuthorizationError::Invalid
            }
        }
    }
}
