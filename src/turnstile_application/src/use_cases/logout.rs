use turnstile_core::{TokenService, TokenServiceError};

/// Error types for logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Token service error: {0}")]
    TokenServiceError(#[from] TokenServiceError),
}

/// Logout use case - revokes the bearer token presented by the client
pub struct LogoutUseCase<T>
where
    T: TokenService,
{
    token_service: T,
}

impl<T> LogoutUseCase<T>
where
    T: TokenService,
{
    pub fn new(token_service: T) -> Self {
        Self { token_service }
    }

    /// Execute the logout use case
    ///
    /// # Arguments
    /// * `token` - The plain-text bearer token to revoke
    ///
    /// # Returns
    /// Whether a live token was revoked, or LogoutError
    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self, token))]
    pub async fn execute(&self, token: &str) -> Result<bool, LogoutError> {
        let revoked = self.token_service.revoke(token).await?;
        if !revoked {
            tracing::debug!("Logout with a token that was not live");
        }
        Ok(revoked)
    }
}
