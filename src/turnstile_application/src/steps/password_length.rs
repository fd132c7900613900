use secrecy::ExposeSecret;
use turnstile_core::{
    Context, PASSWORD_KEY, Rejection, StepError, ValidationOutcome, ValidationStep,
};

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;
pub const DEFAULT_MAX_PASSWORD_LENGTH: usize = 100;

/// Rejects a `password` whose length in bytes falls outside `[min, max]`.
/// A missing password counts as length zero.
#[derive(Debug, Clone, Copy)]
pub struct PasswordLengthStep {
    min: usize,
    max: usize,
}

impl PasswordLengthStep {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Default for PasswordLengthStep {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASSWORD_LENGTH, DEFAULT_MAX_PASSWORD_LENGTH)
    }
}

#[async_trait::async_trait]
impl ValidationStep for PasswordLengthStep {
    fn name(&self) -> &'static str {
        "password_length"
    }

    async fn check(&self, context: &Context) -> Result<ValidationOutcome, StepError> {
        let length = context
            .text(PASSWORD_KEY)
            .map(|password| password.expose_secret().len())
            .unwrap_or_default();

        if length < self.min {
            return Ok(ValidationOutcome::reject(Rejection::PasswordTooShort(
                self.min,
            )));
        }
        if length > self.max {
            return Ok(ValidationOutcome::reject(Rejection::PasswordTooLong(
                self.max,
            )));
        }
        Ok(ValidationOutcome::pass())
    }
}
