//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Result, ServiceError};

/// Deployment environment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    /// Local development: human-readable logs, verbose crate output.
    #[default]
    Development,
    /// Production: JSON logs at the configured level.
    Production,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP listening port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment (`ENV`).
    #[serde(default)]
    pub env: Environment,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_port() -> u16 {
    3801
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            env: Environment::default(),
            log_level: default_log_level(),
        }
    }
}

/// Result of looking for a `.env` file before reading the environment.
#[derive(Debug)]
pub enum DotenvOutcome {
    /// A file was found and loaded.
    Loaded(PathBuf),
    /// No file was loaded; carries the reason.
    Missing(dotenvy::Error),
    /// Skipped because `ENV=production`.
    Skipped,
}

/// Load `.env` into the process environment unless running in production.
pub fn load_dotenv() -> DotenvOutcome {
    if std::env::var("ENV").is_ok_and(|env| env.eq_ignore_ascii_case("production")) {
        return DotenvOutcome::Skipped;
    }

    match dotenvy::dotenv() {
        Ok(path) => DotenvOutcome::Loaded(path),
        Err(e) => DotenvOutcome::Missing(e),
    }
}

impl Config {
    /// Read configuration from the current process environment only.
    pub fn from_env() -> Result<Self> {
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be between 1 and 65535".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "LOG_LEVEL must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        Ok(())
    }

    /// Validate, converting the failure into a [`ServiceError`].
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate().map_err(ServiceError::InvalidConfig)
    }

    /// Check if running in production.
    pub fn is_production(&self) -> bool {
        self.env == Environment::Production
    }
}
