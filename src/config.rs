// src/config.rs
use derive_more::Display;
use log::{info, warn};
use std::env;
use std::str::FromStr;
use std::time::Duration;

// Errors raised while reading configuration at startup
#[derive(Debug, Display)]
pub enum ConfigError {
    #[display(fmt = "Invalid value for {}: {}", key, reason)]
    InvalidValue { key: String, reason: String },
}

impl std::error::Error for ConfigError {}

// Application settings, built once in main and shared through web::Data
#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: String,
    pub app_version: String,
    pub api_key: String,
    pub bind_address: String,
    pub database_url: String,
    pub db_pool_size: u32,
    pub db_acquire_timeout: Duration,
    pub viewed_teams_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_env: String::new(),
            app_version: String::new(),
            api_key: String::new(),
            bind_address: "127.0.0.1:9090".to_string(),
            database_url: "sqlite://ptg.db?mode=rwc".to_string(),
            db_pool_size: 10,
            db_acquire_timeout: Duration::from_secs(5),
            viewed_teams_limit: 6,
        }
    }
}

impl Config {
    // Read settings from the environment (and .env, if main loaded one)
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let viewed_teams_limit: usize =
            try_load("VIEWED_TEAMS_LIMIT", defaults.viewed_teams_limit)?;
        if viewed_teams_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "VIEWED_TEAMS_LIMIT".to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }

        Ok(Self {
            app_env: try_load("APP_ENV", defaults.app_env)?,
            app_version: try_load("APP_VERSION", defaults.app_version)?,
            api_key: try_load("API_KEY", defaults.api_key)?,
            bind_address: try_load("BIND_ADDRESS", defaults.bind_address)?,
            database_url: try_load("DATABASE_URL", defaults.database_url)?,
            db_pool_size: try_load("DB_POOL_SIZE", defaults.db_pool_size)?,
            db_acquire_timeout: Duration::from_secs(try_load(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.db_acquire_timeout.as_secs(),
            )?),
            viewed_teams_limit,
        })
    }
}

fn try_load<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {} value: {}", key, e);
            ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            }
        }),
        Err(_) => {
            info!("{} not set, using default: {:?}", key, default);
            Ok(default)
        }
    }
}
