//! # Turnstile - Login Validation Library
//!
//! This is a facade crate that re-exports all public APIs from the turnstile components.
//! Use this crate to get access to the whole login pipeline in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Context`, `ValidationOutcome`, `LoginResult`, etc.
//! - **Ports**: `CredentialStore`, `PasswordHasher`, `TokenService`, `RateLimiter`, `ValidationStep`
//! - **Chain**: `ChainBuilder`, `ValidationChain` and the six standard steps
//! - **Use cases**: `LoginUseCase`, `LogoutUseCase`
//! - **Adapters**: `PostgresCredentialStore`, `RedisRateLimiter`, `Argon2PasswordHasher`, etc.
//! - **Service**: `LoginService` - The main entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use turnstile_core::*;
}

// Re-export most commonly used core types at the root level
pub use turnstile_core::{
    Context, ContextValue, Credentials, Email, LoginResult, PublicUser, Rejection, ThrottleKey,
    UserRecord, ValidationOutcome,
};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use turnstile_core::{
        Admission, CredentialStore, CredentialStoreError, PasswordHasher, PasswordHasherError,
        RateLimiter, RateLimiterError, StepError, TokenService, TokenServiceError, ValidationStep,
    };
}

// Re-export port traits at root level
pub use ports::{CredentialStore, PasswordHasher, RateLimiter, TokenService, ValidationStep};

// ============================================================================
// Validation Chain and Use Cases (Application Layer)
// ============================================================================

/// Chain, standard steps and use cases
pub mod application {
    pub use turnstile_application::*;
}

pub use turnstile_application::{
    ChainBuilder, ChainOptions, LoginError, LoginUseCase, LogoutError, LogoutUseCase,
    ValidationChain, default_chain,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Credential and token stores
    pub mod persistence {
        pub use turnstile_adapters::persistence::*;
    }

    /// Attempt counters
    pub mod rate_limiting {
        pub use turnstile_adapters::rate_limiting::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use turnstile_adapters::hashing::*;
    }

    /// Configuration
    pub mod config {
        pub use turnstile_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use turnstile_adapters::{
    Argon2PasswordHasher, HashMapCredentialStore, HashMapRateLimiter, HashMapTokenStore,
    PostgresCredentialStore, PostgresTokenStore, RedisRateLimiter, config::LoginSettings,
    telemetry::init_tracing,
};

// ============================================================================
// Login Service (Main Entry Point)
// ============================================================================

/// Main login service
pub use turnstile_service::{
    LoginService, SetupError, configure_postgresql, configure_redis, get_redis_client,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits and custom steps
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
