use std::time::Duration;

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{throttle_key::ThrottleKey, user::UserRecord};

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Secret<String>) -> Result<Secret<String>, PasswordHasherError>;

    /// `Ok(false)` for a wrong password; `Err` only when the check itself could not run.
    async fn verify(
        &self,
        password: &Secret<String>,
        password_hash: &Secret<String>,
    ) -> Result<bool, PasswordHasherError>;
}

// TokenService port trait and errors
#[derive(Debug, Error)]
pub enum TokenServiceError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait TokenService: Send + Sync {
    /// Issues a new opaque bearer token for `user` and returns its plain text.
    async fn issue(&self, user: &UserRecord, name: &str) -> Result<String, TokenServiceError>;

    async fn revoke_all(&self, user: &UserRecord) -> Result<(), TokenServiceError>;

    /// Revokes every existing token of `user` and issues a single new one.
    ///
    /// Implementations backed by a store with transactions should override this so
    /// both halves commit together.
    async fn rotate(&self, user: &UserRecord, name: &str) -> Result<String, TokenServiceError> {
        self.revoke_all(user).await?;
        self.issue(user, name).await
    }

    /// Owner of a live token, if any.
    async fn find_owner(&self, token: &str) -> Result<Option<Uuid>, TokenServiceError>;

    /// Revokes a single token. Returns whether it was live.
    async fn revoke(&self, token: &str) -> Result<bool, TokenServiceError>;
}

// RateLimiter port trait and errors
#[derive(Debug, Error)]
pub enum RateLimiterError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Decision taken by [`RateLimiter::attempt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The attempt was counted; `attempts` includes it.
    Admitted { attempts: u32 },
    /// The key is exhausted until `retry_after` has elapsed. Nothing was counted.
    Throttled { retry_after: Duration },
}

/// Keyed attempt counter with a decay window.
///
/// The window opens on the first hit for a key and is not extended by later hits;
/// once it has elapsed the counter starts again from zero.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn too_many_attempts(
        &self,
        key: &ThrottleKey,
        max_attempts: u32,
    ) -> Result<bool, RateLimiterError>;

    /// Time left until the current window for `key` closes.
    async fn available_in(&self, key: &ThrottleKey) -> Result<Duration, RateLimiterError>;

    /// Counts one attempt and returns the new total.
    async fn hit(&self, key: &ThrottleKey, decay: Duration) -> Result<u32, RateLimiterError>;

    async fn clear(&self, key: &ThrottleKey) -> Result<(), RateLimiterError>;

    /// Check-then-hit. Concurrent callers on one key must never both be admitted
    /// for the last remaining slot, so implementations should override this with
    /// an atomic version; the default only composes the primitives above.
    async fn attempt(
        &self,
        key: &ThrottleKey,
        max_attempts: u32,
        decay: Duration,
    ) -> Result<Admission, RateLimiterError> {
        if self.too_many_attempts(key, max_attempts).await? {
            let retry_after = self.available_in(key).await?;
            return Ok(Admission::Throttled { retry_after });
        }
        let attempts = self.hit(key, decay).await?;
        Ok(Admission::Admitted { attempts })
    }
}
