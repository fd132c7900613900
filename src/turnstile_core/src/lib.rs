pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    context::{Context, ContextValue, EMAIL_KEY, PASSWORD_KEY, USER_KEY},
    credentials::Credentials,
    email::{Email, EmailError},
    login_result::{LoginFailure, LoginResult, LoginSuccess, SUCCESS_MESSAGE, TOKEN_TYPE},
    outcome::{Rejection, ValidationOutcome},
    throttle_key::ThrottleKey,
    user::{PublicUser, UserRecord},
};

pub use ports::{
    repositories::{CredentialStore, CredentialStoreError},
    services::{
        Admission, PasswordHasher, PasswordHasherError, RateLimiter, RateLimiterError,
        TokenService, TokenServiceError,
    },
};

pub use strategies::validation_step::{StepError, ValidationStep};
