use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::ENV_PREFIX;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub ranges: RangesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the address the listener binds to, as "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the server origin URL.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.clone()
        } else {
            format!("http://{}", self.bind_addr())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Limits applied by the HTTP layer before running range algebra.
#[derive(Debug, Clone, Deserialize)]
pub struct RangesConfig {
    /// Largest total number of days (over every range in a request) that a
    /// single sub/impose call may expand.
    pub max_span_days: u64,
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder with every default value set.
    ///
    /// ## Errors
    /// Returns an error if a default cannot be registered.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "info")?
            .set_default("ranges.max_span_days", 36_600)?)
    }

    /// ## Summary
    /// Loads configuration from `config.toml` and environment variables into a `Settings`.
    /// Environment variables (`DAYBOOK_SERVER__PORT`, ...) take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            );

        Ok(Self::from_builder(builder)?)
    }

    /// ## Summary
    /// Builds the sources collected in `builder` into validated `Settings`.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if a source cannot be read or a value
    /// has the wrong type, and `CoreError::ValidationError` from [`Settings::validate`].
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> CoreResult<Self> {
        let settings = builder
            .build()
            .and_then(|config| config.try_deserialize::<Self>())
            .map_err(|e| CoreError::ConfigError(e.to_string()))?;

        settings.validate()?;

        Ok(settings)
    }

    /// ## Summary
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` naming the offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.ranges.max_span_days == 0 {
            return Err(CoreError::ValidationError(
                "ranges.max_span_days must be greater than zero".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if dotenvy::dotenv().is_err() {
        tracing::debug!("No .env file loaded");
    }

    Settings::load()
}
