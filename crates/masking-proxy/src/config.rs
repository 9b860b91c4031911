//! Configuration for the masking proxy.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Proxy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// MessageBird API configuration
    #[serde(default)]
    pub messagebird: MessageBirdConfig,

    /// Record storage configuration
    #[serde(default)]
    pub records: RecordsConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageBirdConfig {
    /// REST endpoint; overridable for tests
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Live access key for the MessageBird account
    #[serde(default = "default_access_key")]
    pub access_key: SecretString,

    /// Request timeout
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordsConfig {
    /// Path to the JSON record file
    #[serde(default = "default_records_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, records are in-memory only)
    #[serde(default = "default_true")]
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Ride registrations per minute
    #[serde(default = "default_create_ride_rpm")]
    pub create_ride_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for MessageBirdConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            access_key: default_access_key(),
            timeout: default_timeout(),
        }
    }
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            path: default_records_path(),
            persist: true,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            create_ride_per_minute: default_create_ride_rpm(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_api_url() -> String {
    messagebird_client::DEFAULT_API_URL.into()
}

fn default_access_key() -> SecretString {
    SecretString::new(String::new())
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_records_path() -> PathBuf {
    PathBuf::from("/data/records.json")
}

fn default_true() -> bool {
    true
}

fn default_create_ride_rpm() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
