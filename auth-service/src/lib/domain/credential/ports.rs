use async_trait::async_trait;

use crate::credential::errors::AuthorizationError;
use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::IssuedToken;
use crate::credential::models::LoginCommand;
use crate::credential::models::NewCredential;
use crate::credential::models::RegisterCommand;
use crate::credential::models::UserId;
use crate::credential::models::Username;

/// Port for credential lifecycle operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new credential.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Stored credential
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already registered
    /// * `HashingFailed` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Credential, CredentialError>;

    /// Exchange a username and password for a token.
    ///
    /// # Errors
    /// * `UserNotFound` - No credential for the username
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenIssuance` - Token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, CredentialError>;

    /// Resolve a presented token to the identity it proves.
    ///
    /// # Errors
    /// * `Missing` - No token presented
    /// * `Expired` - Token expiry has passed
    /// * `Invalid` - Token is forged, tampered with or unparseable
    fn authorize(&self, token: Option<&str>) -> Result<UserId, AuthorizationError>;

    /// Check that the credential store is reachable.
    ///
    /// # Errors
    /// * `DatabaseError` - Store did not answer
    async fn check_health(&self) -> Result<(), CredentialError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Persist a new credential.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username uniqueness violated in the store
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, credential: NewCredential) -> Result<Credential, CredentialError>;

    /// Retrieve a credential by username.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialError>;

    /// Round trip to the store.
    ///
    /// # Errors
    /// * `DatabaseError` - Store did not answer
    async fn ping(&self) -> Result<(), CredentialError>;
}
