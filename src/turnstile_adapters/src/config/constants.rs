pub mod env {
    pub const ENVIRONMENT_ENV_VAR: &str = "TURNSTILE_ENVIRONMENT";
    pub const ENV_PREFIX: &str = "TURNSTILE";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const CONFIG_DIR: &str = "config";
pub const BASE_CONFIG_FILE: &str = "base";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub mod defaults {
    pub const REQUIRED_FIELDS: [&str; 2] = ["email", "password"];
    // u64 because config values have no usize conversion
    pub const MIN_PASSWORD_LENGTH: u64 = 8;
    pub const MAX_PASSWORD_LENGTH: u64 = 100;
    pub const MAX_ATTEMPTS: u32 = 5;
    pub const DECAY_SECONDS: u64 = 5 * 60;
    pub const TOKEN_NAME: &str = "auth_token";
    pub const POSTGRES_MAX_CONNECTIONS: u32 = 5;
}
