use secrecy::Secret;
use serde::Deserialize;

/// Raw login input. Either field may be absent, as in an incomplete request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<Secret<String>>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(Secret::from(email.into())),
            password: Some(Secret::from(password.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn missing_fields_deserialize_as_none() {
        let credentials: Credentials =
            serde_json::from_str(r#"{"password":"password123"}"#).unwrap();

        assert!(credentials.email.is_none());
        assert_eq!(
            credentials.password.unwrap().expose_secret(),
            "password123"
        );
    }

    #[test]
    fn debug_output_redacts_values() {
        let credentials = Credentials::new("test@example.com", "password123");
        let debug = format!("{credentials:?}");

        assert!(!debug.contains("password123"));
        assert!(!debug.contains("test@example.com"));
    }
}
