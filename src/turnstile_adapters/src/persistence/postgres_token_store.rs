use sqlx::{PgPool, Postgres, Transaction};
use turnstile_core::{TokenService, TokenServiceError, UserRecord};
use uuid::Uuid;

use crate::persistence::token;

fn unexpected(e: sqlx::Error) -> TokenServiceError {
    TokenServiceError::UnexpectedError(e.to_string())
}

/// Bearer tokens in the `personal_access_tokens` table.
#[derive(Clone)]
pub struct PostgresTokenStore {
    pool: PgPool,
}

impl PostgresTokenStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresTokenStore { pool }
    }

    async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        user: &UserRecord,
        name: &str,
    ) -> Result<String, TokenServiceError> {
        let minted = token::mint();
        sqlx::query(
            r#"
                INSERT INTO personal_access_tokens (id, user_id, name, token_hash)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(minted.id)
        .bind(user.id())
        .bind(name)
        .bind(&minted.hash)
        .execute(&mut **tx)
        .await
        .map_err(unexpected)?;

        Ok(minted.plain_text)
    }

    async fn delete_for_user(
        tx: &mut Transaction<'_, Postgres>,
        user: &UserRecord,
    ) -> Result<(), TokenServiceError> {
        sqlx::query("DELETE FROM personal_access_tokens WHERE user_id = $1")
            .bind(user.id())
            .execute(&mut **tx)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TokenService for PostgresTokenStore {
    #[tracing::instrument(name = "Issuing token in PostgreSQL", skip_all)]
    async fn issue(&self, user: &UserRecord, name: &str) -> Result<String, TokenServiceError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        let token = Self::insert(&mut tx, user, name).await?;
        tx.commit().await.map_err(unexpected)?;
        Ok(token)
    }

    #[tracing::instrument(name = "Revoking user tokens in PostgreSQL", skip_all)]
    async fn revoke_all(&self, user: &UserRecord) -> Result<(), TokenServiceError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        Self::delete_for_user(&mut tx, user).await?;
        tx.commit().await.map_err(unexpected)
    }

    #[tracing::instrument(name = "Rotating user tokens in PostgreSQL", skip_all)]
    async fn rotate(&self, user: &UserRecord, name: &str) -> Result<String, TokenServiceError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        Self::delete_for_user(&mut tx, user).await?;
        let token = Self::insert(&mut tx, user, name).await?;
        tx.commit().await.map_err(unexpected)?;
        Ok(token)
    }

    #[tracing::instrument(name = "Looking up token in PostgreSQL", skip_all)]
    async fn find_owner(&self, token: &str) -> Result<Option<Uuid>, TokenServiceError> {
        let Some((id, hash)) = token::parse(token) else {
            return Ok(None);
        };

        sqlx::query_scalar::<_, Uuid>(
            r#"
                SELECT user_id
                FROM personal_access_tokens
                WHERE id = $1 AND token_hash = $2
            "#,
        )
        .bind(id)
        .bind(&hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)
    }

    #[tracing::instrument(name = "Revoking token in PostgreSQL", skip_all)]
    async fn revoke(&self, token: &str) -> Result<bool, TokenServiceError> {
        let Some((id, hash)) = token::parse(token) else {
            return Ok(false);
        };

        let result = sqlx::query(
            r#"
                DELETE FROM personal_access_tokens
                WHERE id = $1 AND token_hash = $2
            "#,
        )
        .bind(id)
        .bind(&hash)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(result.rows_affected() > 0)
    }
}
