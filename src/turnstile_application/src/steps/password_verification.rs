use turnstile_core::{
    Context, PASSWORD_KEY, PasswordHasher, Rejection, StepError, USER_KEY, ValidationOutcome,
    ValidationStep,
};

/// Checks `password` against the stored hash of the `user` found upstream.
#[derive(Debug, Clone)]
pub struct PasswordVerificationStep<H>
where
    H: PasswordHasher,
{
    hasher: H,
}

impl<H> PasswordVerificationStep<H>
where
    H: PasswordHasher,
{
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }
}

#[async_trait::async_trait]
impl<H> ValidationStep for PasswordVerificationStep<H>
where
    H: PasswordHasher,
{
    fn name(&self) -> &'static str {
        "password_verification"
    }

    async fn check(&self, context: &Context) -> Result<ValidationOutcome, StepError> {
        let password = context
            .text(PASSWORD_KEY)
            .ok_or(StepError::MissingContext(PASSWORD_KEY))?;
        let user = context.user().ok_or(StepError::MissingContext(USER_KEY))?;

        if !self.hasher.verify(password, user.password_hash()).await? {
            return Ok(ValidationOutcome::reject(Rejection::InvalidCredentials));
        }
        Ok(ValidationOutcome::pass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::{ExposeSecret, Secret};
    use turnstile_core::{Credentials, Email, PasswordHasherError, UserRecord};
    use uuid::Uuid;

    // Mock hasher: the "hash" is the password with a prefix
    #[derive(Clone)]
    struct MockPasswordHasher;

    #[async_trait::async_trait]
    impl PasswordHasher for MockPasswordHasher {
        async fn hash(
            &self,
            password: &Secret<String>,
        ) -> Result<Secret<String>, PasswordHasherError> {
            Ok(Secret::from(format!("hashed:{}", password.expose_secret())))
        }

        async fn verify(
            &self,
            password: &Secret<String>,
            password_hash: &Secret<String>,
        ) -> Result<bool, PasswordHasherError> {
            let Some(stored) = password_hash.expose_secret().strip_prefix("hashed:") else {
                return Err(PasswordHasherError::MalformedHash("missing prefix".to_string()));
            };
            Ok(stored == password.expose_secret())
        }
    }

    fn context_with_user(password: &str, stored_hash: &str) -> Context {
        let user = UserRecord::new(
            Uuid::new_v4(),
            "Test User".to_string(),
            Email::parse(Secret::from("test@example.com".to_string())).unwrap(),
            Secret::from(stored_hash.to_string()),
        );
        Context::from_credentials(Credentials::new("test@example.com", password)).with_user(user)
    }

    #[tokio::test]
    async fn test_matching_password_passes() {
        let step = PasswordVerificationStep::new(MockPasswordHasher);

        let outcome = step
            .check(&context_with_user("password123", "hashed:password123"))
            .await
            .unwrap();

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_wrong_password_gets_generic_rejection() {
        let step = PasswordVerificationStep::new(MockPasswordHasher);

        let outcome = step
            .check(&context_with_user("wrongpassword", "hashed:password123"))
            .await
            .unwrap();

        assert_eq!(
            outcome.error_message().as_deref(),
            Some("the supplied credentials are incorrect")
        );
    }

    #[tokio::test]
    async fn test_missing_user_is_a_chain_error() {
        let step = PasswordVerificationStep::new(MockPasswordHasher);
        let context = Context::from_credentials(Credentials::new("test@example.com", "password123"));

        let result = step.check(&context).await;

        assert!(matches!(result, Err(StepError::MissingContext("user"))));
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let step = PasswordVerificationStep::new(MockPasswordHasher);

        let result = step
            .check(&context_with_user("password123", "plain"))
            .await;

        assert!(matches!(result, Err(StepError::PasswordHasher(_))));
    }
}
