use secrecy::ExposeSecret;
use turnstile_core::{
    Context, CredentialStoreError, Credentials, EMAIL_KEY, LoginResult, PasswordHasherError,
    RateLimiter, RateLimiterError, StepError, ThrottleKey, TokenService, TokenServiceError,
    ValidationOutcome,
};

use crate::chain::ValidationChain;

pub const DEFAULT_TOKEN_NAME: &str = "auth_token";

/// Error types specific to login use case
///
/// A rejected login is not an error: it comes back as [`LoginResult::Failure`].
/// Everything here should be reported to the client as a generic server error.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
    #[error("Rate limiter error: {0}")]
    RateLimiterError(#[from] RateLimiterError),
    #[error("Token service error: {0}")]
    TokenServiceError(#[from] TokenServiceError),
    #[error("Login pipeline invariant violated: {0}")]
    InvariantViolation(String),
}

impl LoginError {
    /// True when the chain itself is broken, as opposed to a collaborator failing.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

impl From<StepError> for LoginError {
    fn from(error: StepError) -> Self {
        match error {
            StepError::CredentialStore(e) => Self::CredentialStoreError(e),
            StepError::PasswordHasher(e) => Self::PasswordHasherError(e),
            StepError::RateLimiter(e) => Self::RateLimiterError(e),
            StepError::MissingContext(key) => {
                Self::InvariantViolation(format!("a step ran without '{key}' in its context"))
            }
        }
    }
}

/// Login use case - runs the validation chain and, when it accepts, issues a token
///
/// On acceptance all earlier tokens of the account are revoked, exactly one new
/// token is issued and the attempt counter for the email is cleared. A rejection
/// has no side effects beyond what the chain's own steps did.
pub struct LoginUseCase<T, R>
where
    T: TokenService,
    R: RateLimiter,
{
    chain: ValidationChain,
    token_service: T,
    rate_limiter: R,
    token_name: String,
}

impl<T, R> LoginUseCase<T, R>
where
    T: TokenService,
    R: RateLimiter,
{
    pub fn new(chain: ValidationChain, token_service: T, rate_limiter: R) -> Self {
        Self {
            chain,
            token_service,
            rate_limiter,
            token_name: DEFAULT_TOKEN_NAME.to_string(),
        }
    }

    pub fn with_token_name(mut self, token_name: impl Into<String>) -> Self {
        self.token_name = token_name.into();
        self
    }

    /// The chain this use case drives.
    pub fn chain(&self) -> &ValidationChain {
        &self.chain
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `credentials` - Email and password as submitted; either may be missing
    ///
    /// # Returns
    /// `LoginResult::Success` with a fresh bearer token, `LoginResult::Failure` with
    /// the first rejection reason, or `LoginError` if a collaborator failed
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, credentials))]
    pub async fn execute(&self, credentials: Credentials) -> Result<LoginResult, LoginError> {
        let context = match self.chain.run(Context::from_credentials(credentials)).await {
            Ok(ValidationOutcome::Accepted(context)) => context,
            Ok(ValidationOutcome::Rejected(rejection)) => {
                return Ok(LoginResult::failure(rejection.to_string()));
            }
            Err(error) => {
                let error = LoginError::from(error);
                if error.is_invariant_violation() {
                    tracing::error!(%error, "Login validation chain is misconfigured");
                }
                return Err(error);
            }
        };

        let Some(user) = context.user() else {
            tracing::error!(
                steps = ?self.chain.step_names(),
                "Validation chain accepted a login without resolving the account"
            );
            return Err(LoginError::InvariantViolation(
                "accepted login has no 'user' in its context".to_string(),
            ));
        };

        let token = self.token_service.rotate(user, &self.token_name).await?;

        let key = match context.text(EMAIL_KEY) {
            Some(email) => ThrottleKey::for_login(email.expose_secret()),
            None => ThrottleKey::for_login(user.email().as_ref().expose_secret()),
        };
        self.rate_limiter.clear(&key).await?;

        tracing::info!(user_id = %user.id(), "Login succeeded");
        Ok(LoginResult::success(token, user.public()))
    }
}
