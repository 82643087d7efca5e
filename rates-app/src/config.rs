//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use rates_feed::DEFAULT_FEED_URL;
use rates_hex::{DEFAULT_DOWNLOAD_PATH, DEFAULT_HOME_CURRENCY};
use rates_types::CurrencyCode;

const DEFAULT_DATABASE_URL: &str = "sqlite://exchange_rates.db?mode=rwc";

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub feed_url: String,
    pub feed_timeout: Duration,
    pub home_currency: CurrencyCode,
    pub download_path: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "3000")
            .parse()
            .context("PORT must be a valid port number")?;

        let feed_timeout_secs: u64 = var("FEED_TIMEOUT_SECS", "30")
            .parse()
            .context("FEED_TIMEOUT_SECS must be a whole number of seconds")?;

        let home_currency = var("HOME_CURRENCY", DEFAULT_HOME_CURRENCY)
            .parse()
            .context("HOME_CURRENCY must be an alphabetic currency code")?;

        let log_format = match var("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => anyhow::bail!("LOG_FORMAT must be `text` or `json`, got `{}`", other),
        };

        Ok(Self {
            port,
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            feed_url: var("FEED_URL", DEFAULT_FEED_URL),
            feed_timeout: Duration::from_secs(feed_timeout_secs),
            home_currency,
            download_path: var("DOWNLOAD_PATH", DEFAULT_DOWNLOAD_PATH).into(),
            log_format,
        })
    }
}
