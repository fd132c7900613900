pub mod config;
pub mod hashing;
pub mod persistence;
pub mod rate_limiting;
pub mod telemetry;

pub use hashing::Argon2PasswordHasher;
pub use persistence::{
    HashMapCredentialStore, HashMapTokenStore, PostgresCredentialStore, PostgresTokenStore,
};
pub use rate_limiting::{HashMapRateLimiter, RedisRateLimiter};
