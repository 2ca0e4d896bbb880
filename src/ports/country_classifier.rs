//! Country Classifier Port - AI-assisted fallback for country resolution.
//!
//! Used only when exact and approximate matching both fail. The classifier
//! receives the user's free text plus the fixed list of canonical country
//! names and must answer with one of those names or an explicit "unknown".

use async_trait::async_trait;

/// Port for the natural-language classification fallback.
#[async_trait]
pub trait CountryClassifier: Send + Sync {
    /// Picks the candidate name the text most likely refers to.
    ///
    /// `Ok(None)` means the classifier explicitly answered "unknown".
    /// Callers treat any `Err` the same as `Ok(None)` - the fallback
    /// degrades to a non-match, never a user-visible failure.
    async fn classify(
        &self,
        text: &str,
        candidates: &[&str],
    ) -> Result<Option<String>, ClassifierError>;
}

/// Classifier call failures. All of them are absorbed by the resolver.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("network error: {0}")]
    Network(String),

    #[error("malformed answer: {0}")]
    MalformedAnswer(String),

    #[error("request timed out")]
    Timeout,
}

impl ClassifierError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedAnswer(message.into())
    }
}
