use std::fmt;

const LOGIN_KEY_PREFIX: &str = "login:";

/// Key under which login attempts are counted.
///
/// Built from the case-folded email so `User@Example.com` and `user@example.com`
/// share one counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThrottleKey(String);

impl ThrottleKey {
    pub fn for_login(email: &str) -> Self {
        Self(format!("{LOGIN_KEY_PREFIX}{}", email.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ThrottleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThrottleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
