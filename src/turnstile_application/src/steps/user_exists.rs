use turnstile_core::{
    Context, CredentialStore, EMAIL_KEY, Email, Rejection, StepError, ValidationOutcome,
    ValidationStep,
};

/// Looks the account up by email and adds it to the context under `user`.
///
/// An unknown email is reported with the same rejection as a wrong password.
#[derive(Debug, Clone)]
pub struct UserExistsStep<S>
where
    S: CredentialStore,
{
    store: S,
}

impl<S> UserExistsStep<S>
where
    S: CredentialStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S> ValidationStep for UserExistsStep<S>
where
    S: CredentialStore,
{
    fn name(&self) -> &'static str {
        "user_exists"
    }

    async fn check(&self, context: &Context) -> Result<ValidationOutcome, StepError> {
        let raw_email = context
            .text(EMAIL_KEY)
            .ok_or(StepError::MissingContext(EMAIL_KEY))?;

        // Without a format step ahead of us a malformed email can still get here
        let Ok(email) = Email::parse(raw_email.clone()) else {
            return Ok(ValidationOutcome::reject(Rejection::InvalidCredentials));
        };

        match self.store.find_by_email(&email).await? {
            Some(user) => {
                tracing::debug!(user_id = %user.id(), "Account found");
                Ok(ValidationOutcome::Accepted(Context::new().with_user(user)))
            }
            None => {
                tracing::debug!("No account for email");
                Ok(ValidationOutcome::reject(Rejection::InvalidCredentials))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::{ExposeSecret, Secret};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use turnstile_core::{CredentialStoreError, Credentials, UserRecord};
    use uuid::Uuid;

    // Mock store holding a single account
    #[derive(Clone, Default)]
    struct MockCredentialStore {
        email: String,
        lookups: Arc<AtomicUsize>,
        unavailable: bool,
    }

    #[async_trait::async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn find_by_email(
            &self,
            email: &Email,
        ) -> Result<Option<UserRecord>, CredentialStoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.unavailable {
                return Err(CredentialStoreError::UnexpectedError(
                    "connection refused".to_string(),
                ));
            }
            if email.as_ref().expose_secret() != &self.email {
                return Ok(None);
            }
            Ok(Some(UserRecord::new(
                Uuid::new_v4(),
                "Test User".to_string(),
                email.clone(),
                Secret::from("hash".to_string()),
            )))
        }

        async fn add_user(&self, _user: UserRecord) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }
    }

    fn store() -> MockCredentialStore {
        MockCredentialStore {
            email: "test@example.com".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_known_user_is_added_to_context() {
        let step = UserExistsStep::new(store());
        let context = Context::from_credentials(Credentials::new("test@example.com", "password123"));

        let outcome = step.check(&context).await.unwrap();

        let user = outcome.context().unwrap().user().unwrap();
        assert_eq!(user.email().as_ref().expose_secret(), "test@example.com");
    }

    #[tokio::test]
    async fn test_unknown_user_gets_generic_rejection() {
        let step = UserExistsStep::new(store());
        let context =
            Context::from_credentials(Credentials::new("nobody@example.com", "password123"));

        let outcome = step.check(&context).await.unwrap();

        assert_eq!(outcome.rejection(), Some(&Rejection::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_malformed_email_skips_lookup() {
        let store = store();
        let step = UserExistsStep::new(store.clone());
        let context = Context::from_credentials(Credentials::new("not-an-email", "password123"));

        let outcome = step.check(&context).await.unwrap();

        assert_eq!(outcome.rejection(), Some(&Rejection::InvalidCredentials));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_an_error() {
        let step = UserExistsStep::new(MockCredentialStore {
            unavailable: true,
            ..store()
        });
        let context = Context::from_credentials(Credentials::new("test@example.com", "password123"));

        let result = step.check(&context).await;

        assert!(matches!(result, Err(StepError::CredentialStore(_))));
    }
}
