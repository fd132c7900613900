use std::{collections::BTreeMap, sync::Arc};

use secrecy::{ExposeSecret, Secret};

use crate::domain::{credentials::Credentials, user::UserRecord};

pub const EMAIL_KEY: &str = "email";
pub const PASSWORD_KEY: &str = "password";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone)]
pub enum ContextValue {
    Text(Secret<String>),
    User(Arc<UserRecord>),
}

impl ContextValue {
    fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.expose_secret().is_empty(),
            Self::User(_) => false,
        }
    }
}

/// Data accumulated while a login attempt walks the validation chain.
///
/// A context only ever grows: [`Context::merge`] adds keys that are not yet present
/// and leaves existing ones untouched, so the first value written under a key stays
/// authoritative for the rest of the chain. Clones share storage until one of them
/// is extended.
#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: Arc<BTreeMap<String, ContextValue>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a context with whichever credential fields were supplied.
    pub fn from_credentials(credentials: Credentials) -> Self {
        let mut context = Self::new();
        if let Some(email) = credentials.email {
            context = context.with_text(EMAIL_KEY, email);
        }
        if let Some(password) = credentials.password {
            context = context.with_text(PASSWORD_KEY, password);
        }
        context
    }

    pub fn with_text(self, key: &str, value: Secret<String>) -> Self {
        self.with_value(key, ContextValue::Text(value))
    }

    pub fn with_user(self, user: UserRecord) -> Self {
        self.with_value(USER_KEY, ContextValue::User(Arc::new(user)))
    }

    fn with_value(mut self, key: &str, value: ContextValue) -> Self {
        Arc::make_mut(&mut self.entries)
            .entry(key.to_string())
            .or_insert(value);
        self
    }

    /// Layers `additions` on top of `self`. Keys already present keep their value.
    pub fn merge(mut self, additions: Context) -> Self {
        if additions.is_empty() {
            return self;
        }
        let entries = Arc::make_mut(&mut self.entries);
        for (key, value) in additions.entries.iter() {
            entries
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&Secret<String>> {
        match self.entries.get(key) {
            Some(ContextValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&UserRecord> {
        match self.entries.get(USER_KEY) {
            Some(ContextValue::User(user)) => Some(user.as_ref()),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True when `key` exists and holds a non-empty value.
    pub fn is_present(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|value| !value.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::email::Email;
    use quickcheck_macros::quickcheck;
    use uuid::Uuid;

    fn secret(value: &str) -> Secret<String> {
        Secret::from(value.to_string())
    }

    fn text_of(context: &Context, key: &str) -> Option<String> {
        context.text(key).map(|value| value.expose_secret().clone())
    }

    #[test]
    fn from_credentials_only_adds_supplied_fields() {
        let context = Context::from_credentials(Credentials {
            email: Some(secret("test@example.com")),
            password: None,
        });

        assert!(context.contains(EMAIL_KEY));
        assert!(!context.contains(PASSWORD_KEY));
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn empty_text_is_not_present() {
        let context = Context::new().with_text(EMAIL_KEY, secret(""));

        assert!(context.contains(EMAIL_KEY));
        assert!(!context.is_present(EMAIL_KEY));
    }

    #[test]
    fn merge_keeps_existing_values() {
        let base = Context::new().with_text(EMAIL_KEY, secret("first@example.com"));
        let additions = Context::new()
            .with_text(EMAIL_KEY, secret("second@example.com"))
            .with_text(PASSWORD_KEY, secret("password123"));

        let merged = base.merge(additions);

        assert_eq!(
            text_of(&merged, EMAIL_KEY).as_deref(),
            Some("first@example.com")
        );
        assert_eq!(text_of(&merged, PASSWORD_KEY).as_deref(), Some("password123"));
    }

    #[test]
    fn merging_does_not_touch_earlier_clones() {
        let base = Context::new().with_text(EMAIL_KEY, secret("test@example.com"));
        let snapshot = base.clone();

        let user = UserRecord::new(
            Uuid::new_v4(),
            "Test".to_string(),
            Email::parse(secret("test@example.com")).unwrap(),
            secret("hash"),
        );
        let merged = base.merge(Context::new().with_user(user));

        assert!(merged.user().is_some());
        assert!(snapshot.user().is_none());
        assert_eq!(snapshot.len(), 1);
    }

    #[quickcheck]
    fn merge_never_overwrites(base: Vec<(String, String)>, additions: Vec<(String, String)>) -> bool {
        let base_context = base
            .iter()
            .fold(Context::new(), |context, (key, value)| {
                context.with_text(key, secret(value))
            });
        let additions_context = additions
            .iter()
            .fold(Context::new(), |context, (key, value)| {
                context.with_text(key, secret(value))
            });

        let merged = base_context.clone().merge(additions_context.clone());

        let base_kept = base_context
            .keys()
            .all(|key| text_of(&merged, key) == text_of(&base_context, key));
        let additions_added = additions_context.keys().all(|key| merged.contains(key));
        base_kept && additions_added
    }
}
