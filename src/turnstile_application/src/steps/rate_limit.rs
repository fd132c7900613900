use std::time::Duration;

use secrecy::ExposeSecret;
use turnstile_core::{
    Admission, Context, EMAIL_KEY, RateLimiter, Rejection, StepError, ThrottleKey,
    ValidationOutcome, ValidationStep,
};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_DECAY: Duration = Duration::from_secs(5 * 60);

/// Throttles repeated login attempts per case-folded email.
///
/// Every admitted attempt consumes one slot whether it later succeeds or not;
/// clearing the counter after a successful login is the caller's job. Once
/// `max_attempts` slots are used the attempt is rejected until the window decays.
#[derive(Debug, Clone)]
pub struct RateLimitStep<R>
where
    R: RateLimiter,
{
    limiter: R,
    max_attempts: u32,
    decay: Duration,
}

impl<R> RateLimitStep<R>
where
    R: RateLimiter,
{
    pub fn new(limiter: R) -> Self {
        Self::with_limits(limiter, DEFAULT_MAX_ATTEMPTS, DEFAULT_DECAY)
    }

    pub fn with_limits(limiter: R, max_attempts: u32, decay: Duration) -> Self {
        Self {
            limiter,
            max_attempts,
            decay,
        }
    }
}

/// Whole minutes needed to cover `wait`, counting any started minute.
fn minutes_to_wait(wait: Duration) -> u64 {
    let seconds = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    seconds.div_ceil(60)
}

#[async_trait::async_trait]
impl<R> ValidationStep for RateLimitStep<R>
where
    R: RateLimiter,
{
    fn name(&self) -> &'static str {
        "rate_limit"
    }

    async fn check(&self, context: &Context) -> Result<ValidationOutcome, StepError> {
        let email = context
            .text(EMAIL_KEY)
            .ok_or(StepError::MissingContext(EMAIL_KEY))?;
        let key = ThrottleKey::for_login(email.expose_secret());

        match self
            .limiter
            .attempt(&key, self.max_attempts, self.decay)
            .await?
        {
            Admission::Admitted { attempts } => {
                tracing::debug!(attempts, max_attempts = self.max_attempts, "Login attempt counted");
                Ok(ValidationOutcome::pass())
            }
            Admission::Throttled { retry_after } => {
                tracing::warn!(
                    retry_after_secs = retry_after.as_secs(),
                    "Login attempts throttled"
                );
                Ok(ValidationOutcome::reject(Rejection::TooManyAttempts {
                    minutes: minutes_to_wait(retry_after),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, sync::Arc};
    use tokio::sync::RwLock;
    use turnstile_core::{Credentials, RateLimiterError};

    // Mock limiter: counts hits and reports a fixed remaining window
    #[derive(Clone, Default)]
    struct MockRateLimiter {
        hits: Arc<RwLock<HashMap<ThrottleKey, u32>>>,
        remaining: Duration,
    }

    impl MockRateLimiter {
        async fn hits_for(&self, email: &str) -> u32 {
            let hits = self.hits.read().await;
            hits.get(&ThrottleKey::for_login(email))
                .copied()
                .unwrap_or_default()
        }
    }

    #[async_trait::async_trait]
    impl RateLimiter for MockRateLimiter {
        async fn too_many_attempts(
            &self,
            key: &ThrottleKey,
            max_attempts: u32,
        ) -> Result<bool, RateLimiterError> {
            let hits = self.hits.read().await;
            Ok(hits.get(key).copied().unwrap_or_default() >= max_attempts)
        }

        async fn available_in(&self, _key: &ThrottleKey) -> Result<Duration, RateLimiterError> {
            Ok(self.remaining)
        }

        async fn hit(&self, key: &ThrottleKey, _decay: Duration) -> Result<u32, RateLimiterError> {
            let mut hits = self.hits.write().await;
            let count = hits.entry(key.clone()).or_default();
            *count += 1;
            Ok(*count)
        }

        async fn clear(&self, key: &ThrottleKey) -> Result<(), RateLimiterError> {
            self.hits.write().await.remove(key);
            Ok(())
        }
    }

    fn context(email: &str) -> Context {
        Context::from_credentials(Credentials::new(email, "password123"))
    }

    #[tokio::test]
    async fn test_admitted_attempts_consume_a_slot() {
        let limiter = MockRateLimiter::default();
        let step = RateLimitStep::new(limiter.clone());

        let outcome = step.check(&context("a@b.com")).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(limiter.hits_for("a@b.com").await, 1);
    }

    #[tokio::test]
    async fn test_throttles_after_max_attempts() {
        let limiter = MockRateLimiter {
            remaining: Duration::from_secs(299),
            ..Default::default()
        };
        let step = RateLimitStep::new(limiter.clone());

        for _ in 0..DEFAULT_MAX_ATTEMPTS {
            assert!(step.check(&context("a@b.com")).await.unwrap().is_success());
        }
        let outcome = step.check(&context("a@b.com")).await.unwrap();

        assert_eq!(
            outcome.rejection(),
            Some(&Rejection::TooManyAttempts { minutes: 5 })
        );
        assert_eq!(limiter.hits_for("a@b.com").await, DEFAULT_MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_counter_is_shared_across_email_case() {
        let limiter = MockRateLimiter::default();
        let step = RateLimitStep::with_limits(limiter.clone(), 2, DEFAULT_DECAY);

        step.check(&context("User@Example.com")).await.unwrap();
        step.check(&context("user@example.com")).await.unwrap();
        let outcome = step.check(&context("USER@EXAMPLE.COM")).await.unwrap();

        assert!(outcome.is_failure());
        assert_eq!(limiter.hits_for("user@example.com").await, 2);
    }

    #[tokio::test]
    async fn test_missing_email_is_a_chain_error() {
        let step = RateLimitStep::new(MockRateLimiter::default());

        let result = step.check(&Context::new()).await;
        assert!(matches!(result, Err(StepError::MissingContext("email"))));
    }

    #[test]
    fn test_minutes_round_up() {
        assert_eq!(minutes_to_wait(Duration::from_secs(60)), 1);
        assert_eq!(minutes_to_wait(Duration::from_secs(61)), 2);
        assert_eq!(minutes_to_wait(Duration::from_millis(59_500)), 1);
        assert_eq!(minutes_to_wait(Duration::from_millis(400)), 1);
        assert_eq!(minutes_to_wait(Duration::from_secs(300)), 5);
    }
}
