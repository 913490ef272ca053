use thiserror::Error;

/// Error type for password operations.
///
/// Verification has no error path: a malformed stored hash simply fails to verify.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
