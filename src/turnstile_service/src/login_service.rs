use turnstile_adapters::config::LoginSettings;
use turnstile_application::{
    LoginError, LoginUseCase, LogoutError, LogoutUseCase, ValidationChain, default_chain,
};
use turnstile_core::{
    CredentialStore, Credentials, LoginResult, PasswordHasher, RateLimiter, TokenService,
};

/// Main entry point: validates login attempts and manages the resulting tokens
pub struct LoginService<T, R>
where
    T: TokenService + Clone,
    R: RateLimiter,
{
    login: LoginUseCase<T, R>,
    logout: LogoutUseCase<T>,
}

impl<T, R> LoginService<T, R>
where
    T: TokenService + Clone,
    R: RateLimiter + Clone + 'static,
{
    /// Create a LoginService running the standard chain
    ///
    /// # Arguments
    /// * `store` - Where accounts are looked up
    /// * `hasher` - Verifies submitted passwords against stored hashes
    /// * `tokens` - Issues and revokes bearer tokens (must be Clone)
    /// * `limiter` - Attempt counter, shared by the chain and the success path (must be Clone)
    /// * `settings` - Chain tunables and the token name
    ///
    /// # Note on Architecture
    /// Adapters implement Clone via an internal Arc, so every clone sees the same state.
    pub fn new<S, H>(store: S, hasher: H, tokens: T, limiter: R, settings: &LoginSettings) -> Self
    where
        S: CredentialStore + 'static,
        H: PasswordHasher + 'static,
    {
        let chain = default_chain(store, hasher, limiter.clone(), &settings.chain_options());
        Self::with_chain(chain, tokens, limiter, settings)
    }
}

impl<T, R> LoginService<T, R>
where
    T: TokenService + Clone,
    R: RateLimiter,
{
    /// Create a LoginService around a custom chain
    ///
    /// The chain must leave a `user` in its context when it accepts.
    pub fn with_chain(
        chain: ValidationChain,
        tokens: T,
        limiter: R,
        settings: &LoginSettings,
    ) -> Self {
        tracing::debug!(steps = ?chain.step_names(), "Login chain assembled");

        Self {
            login: LoginUseCase::new(chain, tokens.clone(), limiter)
                .with_token_name(settings.token.name.clone()),
            logout: LogoutUseCase::new(tokens),
        }
    }

    pub fn chain(&self) -> &ValidationChain {
        self.login.chain()
    }

    pub async fn login(&self, credentials: Credentials) -> Result<LoginResult, LoginError> {
        self.login.execute(credentials).await
    }

    /// Revokes `token`. Returns whether it was live.
    pub async fn logout(&self, token: &str) -> Result<bool, LogoutError> {
        self.logout.execute(token).await
    }
}
