use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, user::UserRecord};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Looks up an account by its email exactly as supplied.
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, CredentialStoreError>;
    async fn add_user(&self, user: UserRecord) -> Result<(), CredentialStoreError>;
}

