use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use turnstile_core::{TokenService, TokenServiceError, UserRecord};
use uuid::Uuid;

use crate::persistence::token;

#[derive(Debug, Clone)]
struct StoredToken {
    user_id: Uuid,
    name: String,
    hash: String,
}

/// In-memory bearer tokens. Only SHA-256 hashes of the secrets are kept.
#[derive(Default, Clone)]
pub struct HashMapTokenStore {
    tokens: Arc<RwLock<HashMap<Uuid, StoredToken>>>,
}

impl HashMapTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of live tokens owned by `user_id`.
    pub async fn active_tokens(&self, user_id: Uuid) -> usize {
        let tokens = self.tokens.read().await;
        tokens.values().filter(|t| t.user_id == user_id).count()
    }

    /// Names of the live tokens owned by `user_id`.
    pub async fn token_names(&self, user_id: Uuid) -> Vec<String> {
        let tokens = self.tokens.read().await;
        tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .map(|t| t.name.clone())
            .collect()
    }

    fn insert(tokens: &mut HashMap<Uuid, StoredToken>, user: &UserRecord, name: &str) -> String {
        let minted = token::mint();
        tokens.insert(
            minted.id,
            StoredToken {
                user_id: user.id(),
                name: name.to_string(),
                hash: minted.hash,
            },
        );
        minted.plain_text
    }
}

#[async_trait::async_trait]
impl TokenService for HashMapTokenStore {
    async fn issue(&self, user: &UserRecord, name: &str) -> Result<String, TokenServiceError> {
        let mut tokens = self.tokens.write().await;
        Ok(Self::insert(&mut tokens, user, name))
    }

    async fn revoke_all(&self, user: &UserRecord) -> Result<(), TokenServiceError> {
        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, t| t.user_id != user.id());
        Ok(())
    }

    async fn rotate(&self, user: &UserRecord, name: &str) -> Result<String, TokenServiceError> {
        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, t| t.user_id != user.id());
        Ok(Self::insert(&mut tokens, user, name))
    }

    async fn find_owner(&self, token: &str) -> Result<Option<Uuid>, TokenServiceError> {
        let Some((id, hash)) = token::parse(token) else {
            return Ok(None);
        };
        let tokens = self.tokens.read().await;
        Ok(tokens
            .get(&id)
            .filter(|stored| stored.hash == hash)
            .map(|stored| stored.user_id))
    }

    async fn revoke(&self, token: &str) -> Result<bool, TokenServiceError> {
        let Some((id, hash)) = token::parse(token) else {
            return Ok(false);
        };
        let mut tokens = self.tokens.write().await;
        if tokens.get(&id).is_some_and(|stored| stored.hash == hash) {
            tokens.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}
