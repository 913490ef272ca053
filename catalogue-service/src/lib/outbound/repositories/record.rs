use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::record::errors::RecordError;
use crate::record::models::CreateRecordCommand;
use crate::record::models::Genre;
use crate::record::models::Record;
use crate::record::models::RecordId;
use crate::record::models::RecordKey;
use crate::record::models::RecordName;
use crate::record::models::ReleaseYear;
use crate::record::models::UserId;
use crate::record::ports::RecordRepository;

pub struct PostgresRecordRepository {
    pool: PgPool,
}

impl PostgresRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RecordRow {
    id: i64,
    user_id: i64,
    name: String,
    genre: String,
    year: i32,
}

impl TryFrom<RecordRow> for Record {
    type Error = RecordError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        Ok(Record {
            id: RecordId(row.id),
            user_id: UserId(row.user_id),
            name: RecordName::new(row.name)?,
            genre: Genre::new(row.genre)?,
            year: ReleaseYear::new(row.year)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> RecordError {
    RecordError::DatabaseError(e.to_string())
}

#[async_trait]
impl RecordRepository for PostgresRecordRepository {
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Record>, RecordError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, user_id, name, genre, year
            FROM records
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Record::try_from).collect()
    }

    async fn create(
        &self,
        user_id: UserId,
        command: &CreateRecordCommand,
    ) -> Result<Record, RecordError> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            INSERT INTO records (user_id, name, genre, year)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, genre, year
            "#,
        )
        .bind(user_id.0)
        .bind(command.name.as_str())
        .bind(command.genre.as_str())
        .bind(command.year.value())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Record::try_from(row)
    }

    async fn find_by_key(
        &self,
        user_id: UserId,
        key: &RecordKey,
    ) -> Result<Option<Record>, RecordError> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, user_id, name, genre, year
            FROM records
            WHERE user_id = $1 AND name = $2 AND year = $3
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id.0)
        .bind(key.name.as_str())
        .bind(key.year.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Record::try_from).transpose()
    }

    async fn delete_by_key(&self, user_id: UserId, key: &RecordKey) -> Result<u64, RecordError> {
        let result = sqlx::query(
            r#"
            DELETE FROM records
            WHERE user_id = $1 AND name = $2 AND year = $3
            "#,
        )
        .bind(user_id.0)
        .bind(key.name.as_str())
        .bind(key.year.value())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RecordError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(database_error)
    }
}
