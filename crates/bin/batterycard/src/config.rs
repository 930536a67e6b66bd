//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `batterycard.toml` in the working directory, or the file named
//! by `BATTERYCARD_CONFIG`. Every field has a default so the file is
//! optional, but a card without entities fails validation.

use batterycard_domain::config::CardConfig;
use batterycard_domain::error::CardError;
use batterycard_domain::locale::Localization;
use serde::Deserialize;

const DEFAULT_PATH: &str = "batterycard.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Localized fallback texts.
    pub locale: Localization,
    /// Where entity states are read from.
    pub input: InputConfig,
    /// The card to render.
    pub card: CardConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Entity table source.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSON file holding the entity table. Read from stdin when unset.
    pub states: Option<String>,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// card configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("BATTERYCARD_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BATTERYCARD_STATES") {
            self.input.states = Some(val);
        }
        if let Ok(val) = std::env::var("BATTERYCARD_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.card.validate()?;
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "batterycard=info,batterycard_app=warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Card configuration rejected.
    #[error("invalid card configuration")]
    Card(#[from] CardError),
}
