use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token has expired")]
    Expired,

    /// Bad signature, foreign algorithm, tampered payload or unparseable input.
    #[error("Invalid token: {0}")]
    Malformed(String),
}
