use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{Error as HashError, PasswordHasher as _, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, Secret};
use turnstile_core::{PasswordHasher, PasswordHasherError};

/// Argon2id hashing, run off the async executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn hasher() -> Result<Argon2<'static>, PasswordHasherError> {
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Secret<String>) -> Result<Secret<String>, PasswordHasherError> {
        let password = password.clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(&mut OsRng);
                hasher()?
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|hash| Secret::from(hash.to_string()))
                    .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        password: &Secret<String>,
        password_hash: &Secret<String>,
    ) -> Result<bool, PasswordHasherError> {
        let password = password.clone();
        let stored_hash = password_hash.clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let expected = PasswordHash::new(stored_hash.expose_secret())
                    .map_err(|e| PasswordHasherError::MalformedHash(e.to_string()))?;

                match hasher()?.verify_password(password.expose_secret().as_bytes(), &expected) {
                    Ok(()) => Ok(true),
                    Err(HashError::Password) => Ok(false),
                    Err(e) => Err(PasswordHasherError::UnexpectedError(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?
    }
}
