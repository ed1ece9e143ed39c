//! Configuration module for MediBot.
//!
//! Loads configuration from environment variables. Everything has a default,
//! so a bare `medibot` invocation starts an offline client.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::chat::DEFAULT_REPLY_DELAY;
use crate::hospitals::{DEFAULT_INITIAL_LIMIT, DEFAULT_SEARCH_LIMIT};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Hosted database. `None` runs with in-memory accounts and the bundled
    /// hospital sample.
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,

    /// Where the preferred language is persisted. `None` when the platform
    /// has no data directory and none was configured.
    pub storage_path: Option<PathBuf>,

    /// Simulated assistant "thinking" time.
    pub reply_delay: Duration,

    /// Max hospitals per search.
    pub search_limit: usize,
    /// Hospitals shown before any search.
    pub initial_hospitals: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns error if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongodb_uri = env::var("MONGODB_URI")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let storage_path = match env::var("MEDIBOT_STORAGE_PATH") {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => default_storage_path(),
        };

        let reply_delay = parse_number("MEDIBOT_REPLY_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REPLY_DELAY);

        Ok(Self {
            mongodb_uri,
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "medibot".to_string()),
            storage_path,
            reply_delay,
            search_limit: parse_usize("MEDIBOT_SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)?,
            initial_hospitals: parse_usize("MEDIBOT_INITIAL_HOSPITALS", DEFAULT_INITIAL_LIMIT)?,
        })
    }
}

fn default_storage_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("medibot").join("storage.json"))
}

fn parse_number(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_value(name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_usize(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    Ok(parse_number(name)?
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
        .unwrap_or(default))
}

fn parse_value(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}
