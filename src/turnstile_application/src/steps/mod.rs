mod email_format;
mod password_length;
mod password_verification;
mod rate_limit;
mod required_fields;
mod user_exists;

use std::time::Duration;

pub use email_format::EmailFormatStep;
pub use password_length::{
    DEFAULT_MAX_PASSWORD_LENGTH, DEFAULT_MIN_PASSWORD_LENGTH, PasswordLengthStep,
};
pub use password_verification::PasswordVerificationStep;
pub use rate_limit::{DEFAULT_DECAY, DEFAULT_MAX_ATTEMPTS, RateLimitStep};
pub use required_fields::RequiredFieldsStep;
pub use user_exists::UserExistsStep;

use turnstile_core::{CredentialStore, EMAIL_KEY, PASSWORD_KEY, PasswordHasher, RateLimiter};

use crate::chain::{ChainBuilder, ValidationChain};

/// Tunables of the standard login chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOptions {
    pub required_fields: Vec<String>,
    pub min_password_length: usize,
    pub max_password_length: usize,
    pub max_attempts: u32,
    pub decay: Duration,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            required_fields: vec![EMAIL_KEY.to_string(), PASSWORD_KEY.to_string()],
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            max_password_length: DEFAULT_MAX_PASSWORD_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            decay: DEFAULT_DECAY,
        }
    }
}

/// The standard login chain.
///
/// Local checks come first so malformed input never reaches a collaborator. The
/// rate limiter sits before the account lookup, so attempts against unknown
/// accounts are throttled (and counted) like any other.
pub fn default_chain<S, H, R>(
    store: S,
    hasher: H,
    limiter: R,
    options: &ChainOptions,
) -> ValidationChain
where
    S: CredentialStore + 'static,
    H: PasswordHasher + 'static,
    R: RateLimiter + 'static,
{
    ChainBuilder::new()
        .add(RequiredFieldsStep::new(options.required_fields.iter().cloned()))
        .add(EmailFormatStep::new())
        .add(PasswordLengthStep::new(
            options.min_password_length,
            options.max_password_length,
        ))
        .add(RateLimitStep::with_limits(
            limiter,
            options.max_attempts,
            options.decay,
        ))
        .add(UserExistsStep::new(store))
        .add(PasswordVerificationStep::new(hasher))
        .build()
}
