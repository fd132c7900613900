use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::email::Email;

/// A stored account as seen by the login pipeline.
#[derive(Debug, Clone)]
pub struct UserRecord {
    id: Uuid,
    name: String,
    email: Email,
    password_hash: Secret<String>,
}

impl UserRecord {
    pub fn new(id: Uuid, name: String, email: Email, password_hash: Secret<String>) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    /// The representation that may be returned to the client.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.as_ref().expose_secret().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
