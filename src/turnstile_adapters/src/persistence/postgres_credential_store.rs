use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool, migrate::Migrator};
use turnstile_core::{CredentialStore, CredentialStoreError, Email, UserRecord};
use uuid::Uuid;

/// Schema for the Postgres-backed stores.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = CredentialStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(Secret::from(row.email))
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
        Ok(UserRecord::new(
            row.id,
            row.name,
            email,
            Secret::from(row.password_hash),
        ))
    }
}

#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresCredentialStore { pool }
    }
}

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserRecord>, CredentialStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        row.map(UserRecord::try_from).transpose()
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: UserRecord) -> Result<(), CredentialStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO users (id, name, email, password_hash)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id())
        .bind(user.name())
        .bind(user.email().as_ref().expose_secret().as_str())
        .bind(user.password_hash().expose_secret().as_str());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return CredentialStoreError::UserAlreadyExists;
                }
            }
            CredentialStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }
}
