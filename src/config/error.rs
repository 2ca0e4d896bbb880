//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid inventory API base URL")]
    InvalidBaseUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Polling must allow at least one attempt")]
    InvalidPollAttempts,

    #[error("Chunk size must be positive and not exceed the message limit")]
    InvalidChunkSize,

    #[error("AI model name must not be empty when a key is configured")]
    InvalidAiModel,
}
