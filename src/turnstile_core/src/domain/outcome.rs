use thiserror::Error;

use crate::domain::context::Context;

/// Why a login attempt was turned away.
///
/// The `Display` text is the message shown to the client. Unknown accounts and
/// wrong passwords share [`Rejection::InvalidCredentials`] so the response never
/// reveals which of the two was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("field '{0}' is required")]
    MissingField(String),
    #[error("email format is invalid")]
    InvalidEmail,
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("password must not exceed {0} characters")]
    PasswordTooLong(usize),
    #[error("too many failed attempts, retry in {minutes} minute(s)")]
    TooManyAttempts { minutes: u64 },
    #[error("the supplied credentials are incorrect")]
    InvalidCredentials,
}

impl Rejection {
    /// Minutes until a throttled attempt may be retried, if this is a throttling rejection.
    pub fn retry_after_minutes(&self) -> Option<u64> {
        match self {
            Self::TooManyAttempts { minutes } => Some(*minutes),
            _ => None,
        }
    }
}

/// Result of a single step, or of a whole chain.
///
/// A step that accepts returns only the entries it wants to add; the chain driver
/// merges them into the running context. The chain's own outcome carries the full
/// accumulated context.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    Accepted(Context),
    Rejected(Rejection),
}

impl ValidationOutcome {
    /// Accept without adding anything to the context.
    pub fn pass() -> Self {
        Self::Accepted(Context::new())
    }

    pub fn reject(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(rejection.to_string()),
        }
    }

    pub fn context(&self) -> Option<&Context> {
        match self {
            Self::Accepted(context) => Some(context),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_client_wording() {
        assert_eq!(
            Rejection::MissingField("email".to_string()).to_string(),
            "field 'email' is required"
        );
        assert_eq!(
            Rejection::PasswordTooShort(8).to_string(),
            "password must be at least 8 characters"
        );
        assert_eq!(
            Rejection::PasswordTooLong(100).to_string(),
            "password must not exceed 100 characters"
        );
        assert_eq!(
            Rejection::TooManyAttempts { minutes: 5 }.to_string(),
            "too many failed attempts, retry in 5 minute(s)"
        );
    }

    #[test]
    fn exactly_one_of_message_or_context() {
        let accepted = ValidationOutcome::pass();
        assert!(accepted.is_success());
        assert!(accepted.error_message().is_none());
        assert!(accepted.context().is_some());

        let rejected = ValidationOutcome::reject(Rejection::InvalidEmail);
        assert!(rejected.is_failure());
        assert_eq!(
            rejected.error_message().as_deref(),
            Some("email format is invalid")
        );
        assert!(rejected.context().is_none());
    }

    #[test]
    fn only_throttling_is_retryable_after_wait() {
        assert_eq!(
            Rejection::TooManyAttempts { minutes: 2 }.retry_after_minutes(),
            Some(2)
        );
        assert_eq!(Rejection::InvalidCredentials.retry_after_minutes(), None);
    }
}
