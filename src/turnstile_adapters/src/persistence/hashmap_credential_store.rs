use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use turnstile_core::{CredentialStore, CredentialStoreError, Email, UserRecord};

#[derive(Default, Clone)]
pub struct HashMapCredentialStore {
    users: Arc<RwLock<HashMap<Email, UserRecord>>>,
}

impl HashMapCredentialStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for HashMapCredentialStore {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserRecord>, CredentialStoreError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn add_user(&self, user: UserRecord) -> Result<(), CredentialStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.email()) {
            return Err(CredentialStoreError::UserAlreadyExists);
        }
        users.insert(user.email().clone(), user);
        Ok(())
    }
}
