//! OpenAI Classifier - [`CountryClassifier`] over the chat-completions API.
//!
//! One small, non-streaming completion per call: the model receives the
//! user's free text plus the closed list of catalog names and must answer
//! with exactly one of those names, or the literal token `unknown`. The
//! answer is returned verbatim; matching it back against the catalog is the
//! resolver's job.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::ports::{ClassifierError, CountryClassifier};

/// Answer token meaning "none of the candidates".
const UNKNOWN_TOKEN: &str = "unknown";

/// Chat-completions client configured for single-word classification.
pub struct OpenAiClassifier {
    api_key: Secret<String>,
    model: String,
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl OpenAiClassifier {
    pub fn new(api_key: impl Into<String>) -> Self {
        let timeout = Duration::from_secs(20);
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout,
            client: Self::http_client(timeout),
        }
    }

    /// Builds a classifier from the application configuration.
    ///
    /// Returns `None` when no API key is configured, which disables the
    /// fallback stage entirely.
    pub fn from_config(config: &AiConfig) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }
        let api_key = config.openai_api_key.clone()?;
        Some(
            Self::new(api_key)
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout()),
        )
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = Self::http_client(timeout);
        self
    }

    fn http_client(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client")
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, text: &str, candidates: &[&str]) -> ChatRequest {
        let system = format!(
            "Ты определяешь страну для поиска туров. \
             Пользователь написал название страны в свободной форме. \
             Ответь ровно одним названием из списка: {}. \
             Если текст не указывает ни на одну из них, ответь словом {}.",
            candidates.join(", "),
            UNKNOWN_TOKEN
        );

        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            max_tokens: 10,
            temperature: 0.0,
        }
    }
}

#[async_trait]
impl CountryClassifier for OpenAiClassifier {
    async fn classify(
        &self,
        text: &str,
        candidates: &[&str],
    ) -> Result<Option<String>, ClassifierError> {
        let request = self.build_request(text, candidates);

        let response = self
            .client
            .post(self.completions_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::network(format!("HTTP {}", status)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::malformed(e.to_string()))?;

        let answer = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClassifierError::malformed("response carries no choices"))?;

        Ok(interpret_answer(&answer))
    }
}

/// Normalizes the model's answer; the unknown token and empty text both
/// mean "no match".
fn interpret_answer(answer: &str) -> Option<String> {
    let trimmed = answer.trim().trim_matches(|c: char| c == '"' || c == '.');
    if trimmed.is_empty() || trimmed.to_lowercase() == UNKNOWN_TOKEN {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn request_error(err: reqwest::Error) -> ClassifierError {
    if err.is_timeout() {
        ClassifierError::Timeout
    } else {
        ClassifierError::network(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatAnswer,
}

#[derive(Debug, Deserialize)]
struct ChatAnswer {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_answer_country() {
        assert_eq!(interpret_answer("Турция"), Some("Турция".to_string()));
        assert_eq!(interpret_answer("  Египет.  "), Some("Египет".to_string()));
        assert_eq!(interpret_answer("\"ОАЭ\""), Some("ОАЭ".to_string()));
    }

    #[test]
    fn test_interpret_answer_unknown() {
        assert_eq!(interpret_answer("unknown"), None);
        assert_eq!(interpret_answer(" Unknown "), None);
        assert_eq!(interpret_answer(""), None);
    }

    #[test]
    fn test_request_includes_candidates_and_model() {
        let classifier = OpenAiClassifier::new("sk-test").with_model("gpt-4o");
        let request = classifier.build_request("страна пирамид", &["Египет", "Турция"]);

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages.len(), 2);
        assert!(request.messages[0].content.contains("Египет, Турция"));
        assert_eq!(request.messages[1].content, "страна пирамид");
        assert_eq!(request.temperature, 0.0);
    }

    #[test]
    fn test_from_config_disabled_without_key() {
        let config = AiConfig::default();
        assert!(OpenAiClassifier::from_config(&config).is_none());
    }

    #[test]
    fn test_from_config_enabled_with_key() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            model: "gpt-4o-mini".to_string(),
            ..Default::default()
        };

        let classifier = OpenAiClassifier::from_config(&config).unwrap();

        assert_eq!(classifier.model, "gpt-4o-mini");
    }
}
