//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `TOUR_SCOUT_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use tour_scout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod chat;
mod error;
mod tourvisor;

pub use ai::AiConfig;
pub use chat::ChatConfig;
pub use error::{ConfigError, ValidationError};
pub use tourvisor::TourvisorConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Tour inventory provider (Tourvisor XML API)
    pub tourvisor: TourvisorConfig,

    /// AI country-classification fallback (optional)
    #[serde(default)]
    pub ai: AiConfig,

    /// Chat delivery limits
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TOUR_SCOUT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `TOUR_SCOUT__TOURVISOR__LOGIN=...` -> `tourvisor.login = ...`
    /// - `TOUR_SCOUT__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TOUR_SCOUT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tourvisor.validate()?;
        self.ai.validate()?;
        self.chat.validate()?;
        Ok(())
    }
}
