use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::NewCredential;
use crate::credential::models::UserId;
use crate::credential::models::Username;
use crate::credential::ports::CredentialRepository;

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    id: i64,
    username: String,
    password_hash: String,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = CredentialError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(Credential {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            password_hash: row.password_hash,
        })
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn create(&self, credential: NewCredential) -> Result<Credential, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(credential.username.as_str())
        .bind(credential.password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return CredentialError::DuplicateUsername(
                        credential.username.as_str().to_string(),
                    );
                }
            }
            CredentialError::DatabaseError(e.to_string())
        })?;

        Credential::try_from(row)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), CredentialError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))
    }
}
