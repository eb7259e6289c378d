//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::SecretId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Secret;
use crate::domain::repository::SecretRepository;
use crate::error::BoardResult;

/// PostgreSQL-backed board repository
#[derive(Clone)]
pub struct PgBoardRepository {
    pool: PgPool,
}

impl PgBoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SecretRepository for PgBoardRepository {
    async fn create(&self, secret: &Secret) -> BoardResult<()> {
        sqlx::query(
            r#"
            INSERT INTO secrets (secret_id, text, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(secret.secret_id.as_uuid())
        .bind(&secret.text)
        .bind(secret.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> BoardResult<Vec<Secret>> {
        let rows = sqlx::query_as::<_, SecretRow>(
            r#"
            SELECT secret_id, text, created_at
            FROM secrets
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_secret()).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct SecretRow {
    secret_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

impl SecretRow {
    fn into_secret(self) -> Secret {
        Secret {
            secret_id: SecretId::from_uuid(self.secret_id),
            text: self.text,
            created_at: self.created_at,
        }
    }
}
