//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! A `.env` file in the working directory is honoured (loaded by the binaries
//! through `dotenvy`).
//!
//! ## Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://url_shortener.db?mode=rwc`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `BASE_URL` - Public prefix for short URLs (default: `http://localhost:8080`)
//! - `RUST_LOG` - Log filter (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IP from `X-Forwarded-For` / `X-Real-IP` (default: `false`)
//! - `SHORT_CODE_LENGTH` - Generated code length (default: 6, range 4..=32)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 1000)
//! - `CLICK_WORKER_COUNT` - Click persisting workers (default: 5, range 1..=256)
//! - `MONITOR_ENABLED` - Run the availability monitor (default: `true`)
//! - `MONITOR_INTERVAL_SECONDS` - Time between sweeps (default: 300)
//! - `PROBE_TIMEOUT_SECONDS` - Per-link probe timeout (default: 5)
//! - `SHUTDOWN_GRACE_SECONDS` - Wait after shutdown for in-flight clicks (default: 5)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)

use crate::application::services::DEFAULT_SWEEP_INTERVAL;
use crate::domain::click_pipeline::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT};
use crate::infrastructure::http::http_probe::DEFAULT_PROBE_TIMEOUT;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH};
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, recorded client addresses come from X-Forwarded-For / X-Real-IP.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub short_code_length: usize,
    pub click_queue_capacity: usize,
    pub click_worker_count: usize,
    pub monitor_enabled: bool,
    pub monitor_interval_seconds: u64,
    pub probe_timeout_seconds: u64,
    pub shutdown_grace_seconds: u64,
    pub db_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://url_shortener.db?mode=rwc".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            base_url: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            short_code_length: DEFAULT_CODE_LENGTH,
            click_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            click_worker_count: DEFAULT_WORKER_COUNT,
            monitor_enabled: true,
            monitor_interval_seconds: DEFAULT_SWEEP_INTERVAL.as_secs(),
            probe_timeout_seconds: DEFAULT_PROBE_TIMEOUT.as_secs(),
            shutdown_grace_seconds: 5,
            db_max_connections: 5,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            base_url: env::var("BASE_URL").unwrap_or(defaults.base_url),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            behind_proxy: parse_bool("BEHIND_PROXY", defaults.behind_proxy)?,
            short_code_length: parse_var("SHORT_CODE_LENGTH", defaults.short_code_length)?,
            click_queue_capacity: parse_var("CLICK_QUEUE_CAPACITY", defaults.click_queue_capacity)?,
            click_worker_count: parse_var("CLICK_WORKER_COUNT", defaults.click_worker_count)?,
            monitor_enabled: parse_bool("MONITOR_ENABLED", defaults.monitor_enabled)?,
            monitor_interval_seconds: parse_var(
                "MONITOR_INTERVAL_SECONDS",
                defaults.monitor_interval_seconds,
            )?,
            probe_timeout_seconds: parse_var("PROBE_TIMEOUT_SECONDS", defaults.probe_timeout_seconds)?,
            shutdown_grace_seconds: parse_var(
                "SHUTDOWN_GRACE_SECONDS",
                defaults.shutdown_grace_seconds,
            )?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.short_code_length) {
            anyhow::bail!(
                "SHORT_CODE_LENGTH must be between {} and {}, got {}",
                MIN_CODE_LENGTH,
                MAX_CODE_LENGTH,
                self.short_code_length
            );
        }

        if self.click_queue_capacity == 0 || self.click_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY must be between 1 and 1000000, got {}",
                self.click_queue_capacity
            );
        }

        if self.click_worker_count == 0 || self.click_worker_count > 256 {
            anyhow::bail!(
                "CLICK_WORKER_COUNT must be between 1 and 256, got {}",
                self.click_worker_count
            );
        }

        if self.monitor_interval_seconds == 0 {
            anyhow::bail!("MONITOR_INTERVAL_SECONDS must be greater than 0");
        }

        if self.probe_timeout_seconds == 0 {
            anyhow::bail!("PROBE_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    pub fn monitor_interval(&self) -> Duration {
        Duration::from_secs(self.monitor_interval_seconds)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Short code length: {}", self.short_code_length);
        tracing::info!(
            "  Click queue: capacity {}, {} workers",
            self.click_queue_capacity,
            self.click_worker_count
        );

        if self.monitor_enabled {
            tracing::info!(
                "  Availability monitor: every {}s, probe timeout {}s",
                self.monitor_interval_seconds,
                self.probe_timeout_seconds
            );
        } else {
            tracing::info!("  Availability monitor: disabled");
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: '{value}'")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("{name} must be a boolean, got '{value}'"),
        },
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
