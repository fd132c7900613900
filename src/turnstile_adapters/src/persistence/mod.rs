mod hashmap_credential_store;
mod hashmap_token_store;
mod postgres_credential_store;
mod postgres_token_store;
mod token;

pub use hashmap_credential_store::HashMapCredentialStore;
pub use hashmap_token_store::HashMapTokenStore;
pub use postgres_credential_store::{MIGRATOR, PostgresCredentialStore};
pub use postgres_token_store::PostgresTokenStore;
