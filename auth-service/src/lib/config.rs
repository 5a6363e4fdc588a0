use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub tokens: TokenConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token secrets and lifetimes.
///
/// One signing secret is required. Refresh tokens and the stored-token digest
/// key default to it but accept distinct values, so hardening to per-class
/// secrets is a configuration change, not a code change.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub signing_secret: String,
    pub refresh_signing_secret: Option<String>,
    pub token_hash_key: Option<String>,
    #[serde(default = "default_access_ttl_minutes")]
    pub access_ttl_minutes: i64,
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: i64,
    #[serde(default = "default_reset_ttl_minutes")]
    pub reset_ttl_minutes: i64,
}

impl TokenConfig {
    pub fn refresh_secret(&self) -> &str {
        self.refresh_signing_secret
            .as_deref()
            .unwrap_or(&self.signing_secret)
    }

    pub fn hash_key(&self) -> &str {
        self.token_hash_key
            .as_deref()
            .unwrap_or(&self.signing_secret)
    }
}

fn default_access_ttl_minutes() -> i64 {
    15
}

fn default_refresh_ttl_days() -> i64 {
    7
}

fn default_reset_ttl_minutes() -> i64 {
    60
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKENS__SIGNING_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: TOKENS__SIGNING_SECRET=... overrides tokens.signing_secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
