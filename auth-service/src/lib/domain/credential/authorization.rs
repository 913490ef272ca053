use auth::Authenticator;

use crate::credential::errors::AuthorizationError;
use crate::credential::models::UserId;

/// Resolve the value of an `Authorization` header to the identity it proves.
///
/// The header carries the raw token, without a `Bearer ` prefix. Surrounding
/// whitespace is ignored and a blank value counts as no token.
///
/// # Errors
/// * `Missing` - No token presented
/// * `Expired` - Token expiry has passed
/// * `Invalid` - Token is forged, tampered with or unparseable
pub fn authorize_token(
    authenticator: &Authenticator,
    token: Option<&str>,
) -> Result<UserId, AuthorizationError> {
    let token = token
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthorizationError::Missing)?;

    authenticator
        .validate_token(token)
        .map(|claims| UserId(claims.user_id))
        .map_err(|e| {
            let reason = AuthorizationError::from(e);
            tracing::warn!(reason = %reason, "Token rejected");
            reason
        })
}
