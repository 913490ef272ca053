use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::credential::authorization::authorize_token;
use crate::credential::errors::AuthorizationError;
use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::IssuedToken;
use crate::credential::models::LoginCommand;
use crate::credential::models::NewCredential;
use crate::credential::models::RegisterCommand;
use crate::credential::models::UserId;
use crate::credential::ports::CredentialRepository;
use crate::credential::ports::CredentialServicePort;

/// Domain service implementation for credential operations.
///
/// Password hashing and verification are CPU bound and run on the blocking pool.
pub struct CredentialService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Arc<Authenticator>,
}

impl<CR> CredentialService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `authenticator` - Hasher and token signer holding the process-wide secret
    pub fn new(repository: Arc<CR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<CR> CredentialServicePort for CredentialService<CR>
where
    CR: CredentialRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Credential, CredentialError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(CredentialError::DuplicateUsername(
                command.username.to_string(),
            ));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| CredentialError::HashingFailed(e.to_string()))?
                .map_err(|e| CredentialError::HashingFailed(e.to_string()))?;

        let credential = self
            .repository
            .create(NewCredential {
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %credential.id, "Credential registered");

        Ok(credential)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, CredentialError> {
        let credential = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or_else(|| CredentialError::UserNotFound(command.username.to_string()))?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let user_id = credential.id;
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &credential.password_hash, user_id.0)
        })
        .await
        .map_err(|e| CredentialError::TokenIssuance(e.to_string()))?;

        match result {
            Ok(authentication) => {
                tracing::info!(user_id = %user_id, "Token issued");
                Ok(IssuedToken {
                    token: authentication.access_token,
                    user_id,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!(user_id = %user_id, "Password mismatch");
                Err(CredentialError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => {
                Err(CredentialError::TokenIssuance(e.to_string()))
            }
        }
    }

    fn authorize(&self, token: Option<&str>) -> Result<UserId, AuthorizationError> {
        authorize_token(&self.authenticator, token)
    }

    async fn check_health(&self) -> Result<(), CredentialError> {
        self.repository.ping().await
    }
}
