use std::{
    hash::{Hash, Hasher},
    sync::LazyLock,
};

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<local>[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*)@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$"#,
    )
    .expect("email pattern is a valid regex")
});

#[derive(Debug, Error, PartialEq)]
pub enum EmailError {
    #[error("Invalid email address")]
    InvalidEmail,
}

/// A syntactically valid email address.
///
/// The raw value stays wrapped in a [`Secret`] so it never shows up in debug output.
/// Equality and hashing compare the address exactly as supplied; use
/// [`Email::normalized`] where case-insensitive identity is needed.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn parse(email: Secret<String>) -> Result<Self, EmailError> {
        if !Self::is_valid(email.expose_secret()) {
            return Err(EmailError::InvalidEmail);
        }
        Ok(Self(email))
    }

    /// Checks `candidate` against the standard address grammar without building an `Email`.
    pub fn is_valid(candidate: &str) -> bool {
        if candidate.len() > MAX_EMAIL_LENGTH {
            return false;
        }
        EMAIL_PATTERN
            .captures(candidate)
            .and_then(|captures| captures.name("local"))
            .is_some_and(|local| local.as_str().len() <= MAX_LOCAL_PART_LENGTH)
    }

    /// Lower-cased form of the address.
    pub fn normalized(&self) -> String {
        self.0.expose_secret().to_lowercase()
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
