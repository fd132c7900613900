use secrecy::ExposeSecret;
use turnstile_core::{
    Context, EMAIL_KEY, Email, Rejection, StepError, ValidationOutcome, ValidationStep,
};

/// Rejects an `email` that does not follow the standard address grammar.
/// A missing email is treated as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailFormatStep;

impl EmailFormatStep {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ValidationStep for EmailFormatStep {
    fn name(&self) -> &'static str {
        "email_format"
    }

    async fn check(&self, context: &Context) -> Result<ValidationOutcome, StepError> {
        let email = context
            .text(EMAIL_KEY)
            .map(|email| email.expose_secret().as_str())
            .unwrap_or_default();

        if !Email::is_valid(email) {
            return Ok(ValidationOutcome::reject(Rejection::InvalidEmail));
        }
        Ok(ValidationOutcome::pass())
    }
}
