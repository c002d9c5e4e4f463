//! Application configuration module
//!
//! Provides configuration types for the store server and the in-process
//! store. Values come from environment variables with sensible defaults;
//! see [`AppConfig::from_env`].

use thiserror::Error;

/// Default port for the store server
const DEFAULT_PORT: u16 = 3000;

/// Default broadcast channel capacity for change fan-out
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store server port
    pub port: u16,
    /// Broadcast channel capacity for change fan-out
    pub channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build a configuration from environment variables
    ///
    /// Reads `SERVER_PORT` and `CHANNEL_CAPACITY`, falling back to the
    /// defaults when unset or unparseable.
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let channel_capacity = std::env::var("CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CHANNEL_CAPACITY);
        Self {
            port,
            channel_capacity,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::MissingValue("channel_capacity"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    channel_capacity: Option<usize>,
}

impl AppConfigBuilder {
    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the broadcast channel capacity
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = Some(capacity);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            channel_capacity: self.channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
