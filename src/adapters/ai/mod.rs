//! AI adapters - the country-classification fallback.

mod openai_classifier;

pub use openai_classifier::OpenAiClassifier;
