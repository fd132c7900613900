use std::time::Duration;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;
use turnstile_application::{
    ChainOptions,
    steps::{DEFAULT_MAX_PASSWORD_LENGTH, DEFAULT_MIN_PASSWORD_LENGTH},
};

use crate::config::constants::{
    BASE_CONFIG_FILE, CONFIG_DIR, defaults,
    env::{ENV_PREFIX, ENV_SEPARATOR, ENVIRONMENT_ENV_VAR},
};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginSettings {
    pub required_fields: Vec<String>,
    pub password: PasswordSettings,
    pub rate_limit: RateLimitSettings,
    pub token: TokenSettings,
    #[serde(default)]
    pub postgres: Option<PostgresSettings>,
    #[serde(default)]
    pub redis: Option<RedisSettings>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PasswordSettings {
    pub min_length: usize,
    pub max_length: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateLimitSettings {
    pub max_attempts: u32,
    pub decay_seconds: u64,
}

impl RateLimitSettings {
    pub fn decay(&self) -> Duration {
        Duration::from_secs(self.decay_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenSettings {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    defaults::POSTGRES_MAX_CONNECTIONS
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

impl LoginSettings {
    /// Loads settings from defaults, `config/base.json`, `config/{TURNSTILE_ENVIRONMENT}.json`
    /// and `TURNSTILE__*` environment variables, later sources winning.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = std::env::var(ENVIRONMENT_ENV_VAR).ok();

        Self::builder(environment.as_deref())?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("required_fields"),
            )
            .build()?
            .try_deserialize()
    }

    fn builder(environment: Option<&str>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let mut builder = Config::builder()
            .set_default("required_fields", defaults::REQUIRED_FIELDS.to_vec())?
            .set_default("password.min_length", defaults::MIN_PASSWORD_LENGTH)?
            .set_default("password.max_length", defaults::MAX_PASSWORD_LENGTH)?
            .set_default("rate_limit.max_attempts", defaults::MAX_ATTEMPTS)?
            .set_default("rate_limit.decay_seconds", defaults::DECAY_SECONDS)?
            .set_default("token.name", defaults::TOKEN_NAME)?
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{BASE_CONFIG_FILE}")).required(false));

        if let Some(environment) = environment {
            builder = builder
                .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false));
        }
        Ok(builder)
    }

    /// Tunables for the standard validation chain.
    pub fn chain_options(&self) -> ChainOptions {
        ChainOptions {
            required_fields: self.required_fields.clone(),
            min_password_length: self.password.min_length,
            max_password_length: self.password.max_length,
            max_attempts: self.rate_limit.max_attempts,
            decay: self.rate_limit.decay(),
        }
    }
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            required_fields: defaults::REQUIRED_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            password: PasswordSettings {
                min_length: DEFAULT_MIN_PASSWORD_LENGTH,
                max_length: DEFAULT_MAX_PASSWORD_LENGTH,
            },
            rate_limit: RateLimitSettings {
                max_attempts: defaults::MAX_ATTEMPTS,
                decay_seconds: defaults::DECAY_SECONDS,
            },
            token: TokenSettings {
                name: defaults::TOKEN_NAME.to_string(),
            },
            postgres: None,
            redis: None,
        }
    }
}
