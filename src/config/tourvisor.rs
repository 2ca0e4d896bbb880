//! Tour inventory provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tourvisor XML API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TourvisorConfig {
    /// API login
    pub login: String,

    /// API password
    pub password: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum status polls per search
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,

    /// Pause between status polls, milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Hotel count at which partial results are considered enough
    #[serde(default = "default_min_hotels")]
    pub min_hotels: u32,

    /// Tour count at which partial results are considered enough
    #[serde(default = "default_min_tours")]
    pub min_tours: u32,
}

impl TourvisorConfig {
    /// Get HTTP timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.login.is_empty() {
            return Err(ValidationError::MissingRequired("TOURVISOR LOGIN"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingRequired("TOURVISOR PASSWORD"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.poll_attempts == 0 {
            return Err(ValidationError::InvalidPollAttempts);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://tourvisor.ru/xml".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_poll_attempts() -> u32 {
    24
}

fn default_poll_interval_ms() -> u64 {
    2500
}

fn default_min_hotels() -> u32 {
    10
}

fn default_min_tours() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TourvisorConfig {
        TourvisorConfig {
            login: "login@example.com".to_string(),
            password: "secret".to_string(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            poll_attempts: default_poll_attempts(),
            poll_interval_ms: default_poll_interval_ms(),
            min_hotels: default_min_hotels(),
            min_tours: default_min_tours(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.poll_attempts, 24);
        assert_eq!(config.poll_interval(), Duration::from_millis(2500));
        assert_eq!(config.min_hotels, 10);
        assert_eq!(config.min_tours, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_credentials() {
        let mut no_login = config();
        no_login.login = String::new();
        assert!(no_login.validate().is_err());

        let mut no_password = config();
        no_password.password = String::new();
        assert!(no_password.validate().is_err());
    }

    #[test]
    fn test_validation_bad_base_url() {
        let mut config = config();
        config.base_url = "tourvisor.ru/xml".to_string();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBaseUrl)
        ));
    }

    #[test]
    fn test_validation_zero_poll_attempts() {
        let mut config = config();
        config.poll_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPollAttempts)
        ));
    }
}
