//! AI classifier configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the AI country-classification fallback.
///
/// The whole section is optional: without an API key the resolver simply
/// runs without its third stage.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key; absence disables the fallback
    pub openai_api_key: Option<String>,

    /// Chat-completions model
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if the fallback is configured
    pub fn is_enabled(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_enabled() && self.model.is_empty() {
            return Err(ValidationError::InvalidAiModel);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let config = AiConfig::default();
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_key_stays_disabled() {
        let config = AiConfig {
            openai_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_enabled_requires_model() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            model: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidAiModel)
        ));
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 5,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
