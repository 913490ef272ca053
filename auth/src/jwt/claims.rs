use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of every issued token, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// Identity claim set carried by a bearer token.
///
/// Holds the authenticated user and an absolute expiry. There is no
/// server-side state behind a token; it stops working only when `exp` passes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the credential the token was issued for
    pub user_id: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, issued now and expiring after [`TOKEN_LIFETIME_SECS`].
    pub fn for_user(user_id: i64) -> Self {
        Self::issued_at(user_id, Utc::now().timestamp())
    }

    /// Create claims for a user issued at an explicit Unix timestamp.
    pub fn issued_at(user_id: i64, iat: i64) -> Self {
        Self {
            user_id,
            iat,
            exp: iat.saturating_add(TOKEN_LIFETIME_SECS),
        }
    }

    /// Override the expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Check if the token is expired.
    ///
    /// A token is no longer valid from the expiry second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
