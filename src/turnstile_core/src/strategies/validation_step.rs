use async_trait::async_trait;
use thiserror::Error;

use crate::{
    domain::{context::Context, outcome::ValidationOutcome},
    ports::{
        repositories::CredentialStoreError,
        services::{PasswordHasherError, RateLimiterError},
    },
};

/// Failures a step raises instead of a rejection.
///
/// These are never shown to the client: either a collaborator could not be reached,
/// or the chain was assembled so that a step runs without the context it depends on.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Credential store error: {0}")]
    CredentialStore(#[from] CredentialStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasher(#[from] PasswordHasherError),
    #[error("Rate limiter error: {0}")]
    RateLimiter(#[from] RateLimiterError),
    #[error("Context is missing '{0}'; the chain is misconfigured")]
    MissingContext(&'static str),
}

/// A single check in a login validation chain.
///
/// Steps hold no per-attempt state; anything that must survive between attempts
/// lives in a collaborator handed to the step at construction. Ordering and
/// short-circuiting are the chain's job, so a step only ever looks at the context
/// it is given.
#[async_trait]
pub trait ValidationStep: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Runs this step's own check.
    ///
    /// On success the returned context holds only the entries this step adds;
    /// most steps return [`ValidationOutcome::pass`].
    async fn check(&self, context: &Context) -> Result<ValidationOutcome, StepError>;
}
