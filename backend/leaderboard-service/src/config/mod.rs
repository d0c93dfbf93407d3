use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub redis: RedisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_http_host")]
    pub http_host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_http_workers")]
    pub http_workers: usize,
    #[serde(default, deserialize_with = "deserialize_store_backend")]
    pub store_backend: StoreBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    #[serde(default = "default_redis_command_timeout_ms")]
    pub redis_command_timeout_ms: u64,
}

impl RedisConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_command_timeout_ms)
    }
}

/// Where leaderboards live. `Memory` keeps them in-process (local runs only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown STORE_BACKEND: {}", other)),
        }
    }
}

fn deserialize_store_backend<'de, D>(deserializer: D) -> Result<StoreBackend, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_service_name() -> String {
    "leaderboard-service".to_string()
}

fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_http_workers() -> usize {
    4
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_redis_command_timeout_ms() -> u64 {
    2000
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build from an explicit set of variables, e.g. `SERVICE_NAME`, `HTTP_PORT`, `REDIS_URL`.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let config = Config {
            service: envy::from_iter(vars.clone())?,
            redis: envy::from_iter(vars)?,
        };
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.service.http_workers == 0 {
            return Err(ConfigError::Invalid(
                "HTTP_WORKERS must be greater than 0".to_string(),
            ));
        }
        if self.redis.redis_command_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "REDIS_COMMAND_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
