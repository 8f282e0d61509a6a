//! Logging setup.
//!
//! Settings are passed in explicitly rather than read from the environment
//! here, so the router can be built and tested without any global state.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Config, Environment};
use crate::error::ServiceError;

/// Everything the logging subscriber needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Selects output format and crate verbosity.
    pub environment: Environment,
    /// Base level for all targets.
    pub level: String,
}

impl From<&Config> for LogSettings {
    fn from(config: &Config) -> Self {
        Self {
            environment: config.env,
            level: config.log_level.to_ascii_lowercase(),
        }
    }
}

impl LogSettings {
    /// Filter directives used when `RUST_LOG` is not set.
    pub fn directives(&self) -> String {
        match self.environment {
            Environment::Development => {
                format!("{},average_service=debug,tower_http=debug", self.level)
            }
            Environment::Production => self.level.clone(),
        }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `settings.level`.
pub fn init(settings: &LogSettings) -> Result<(), ServiceError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(settings.directives())
            .map_err(|e| ServiceError::Logging(e.to_string()))?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    let result = match settings.environment {
        Environment::Development => registry.with(fmt::layer().with_target(true)).try_init(),
        Environment::Production => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    };

    result.map_err(|e| ServiceError::Logging(e.to_string()))
}
