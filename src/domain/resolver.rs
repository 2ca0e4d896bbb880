//! Country Resolver - maps free-text input to a canonical country code.
//!
//! Resolution runs three stages in strict precedence order, short-circuiting
//! on the first confident hit:
//!
//! 1. exact lookup in the variation index (confidence 1.0);
//! 2. approximate matching over all index keys, accepting the best match at
//!    or above the similarity threshold (confidence = similarity);
//! 3. one bounded AI-classification call over the fixed catalog names
//!    (fixed confidence 0.8).
//!
//! Any failure of the fallback call degrades to "no match" - resolution
//! itself never errors. What to do with a given confidence (reject,
//! disambiguate, accept) is the dialogue engine's policy, not the resolver's.

use std::sync::Arc;

use crate::domain::catalog::{CountryCatalog, VariationIndex};
use crate::domain::foundation::CountryId;
use crate::ports::CountryClassifier;

/// Minimum similarity ratio for the approximate-match stage.
const FUZZY_THRESHOLD: f64 = 0.80;
/// Confidence assigned to an accepted classifier answer.
const CLASSIFIER_CONFIDENCE: f64 = 0.8;

/// Outcome of one resolution attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub country: Option<CountryId>,
    /// Certainty in [0, 1]; 0.0 whenever `country` is `None`.
    pub confidence: f64,
}

impl Resolution {
    fn hit(country: CountryId, confidence: f64) -> Self {
        Self {
            country: Some(country),
            confidence,
        }
    }

    fn miss() -> Self {
        Self {
            country: None,
            confidence: 0.0,
        }
    }
}

/// Free-text to canonical-country resolution pipeline.
pub struct CountryResolver {
    catalog: CountryCatalog,
    index: VariationIndex,
    classifier: Option<Arc<dyn CountryClassifier>>,
}

impl CountryResolver {
    /// Builds a resolver without the AI fallback stage.
    pub fn new(catalog: CountryCatalog) -> Self {
        let index = VariationIndex::build(&catalog);
        Self {
            catalog,
            index,
            classifier: None,
        }
    }

    /// Attaches the AI classification fallback.
    pub fn with_classifier(mut self, classifier: Arc<dyn CountryClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    /// Resolves free text to a country code with a confidence score.
    pub async fn resolve(&self, free_text: &str) -> Resolution {
        let input = free_text.trim().to_lowercase();
        if input.is_empty() {
            return Resolution::miss();
        }

        // Stage 1: exact variation lookup.
        if let Some(id) = self.index.lookup(&input) {
            return Resolution::hit(id.clone(), 1.0);
        }

        // Stage 2: best approximate match over the index keys.
        if let Some((id, similarity)) = self.best_fuzzy_match(&input) {
            if similarity >= FUZZY_THRESHOLD {
                return Resolution::hit(id, similarity);
            }
        }

        // Stage 3: AI-assisted fallback over catalog display names.
        self.classify(&input).await
    }

    fn best_fuzzy_match(&self, input: &str) -> Option<(CountryId, f64)> {
        self.index
            .iter()
            .map(|(key, id)| (id.clone(), strsim::jaro_winkler(input, key)))
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
    }

    async fn classify(&self, input: &str) -> Resolution {
        let Some(classifier) = &self.classifier else {
            return Resolution::miss();
        };

        let candidates = self.catalog.display_names();
        match classifier.classify(input, &candidates).await {
            Ok(Some(answer)) => {
                // The answer must match a catalog entry or a known alias.
                if let Some(id) = self.catalog.id_by_name(&answer) {
                    return Resolution::hit(id.clone(), CLASSIFIER_CONFIDENCE);
                }
                if let Some(id) = self.index.lookup(&answer) {
                    return Resolution::hit(id.clone(), CLASSIFIER_CONFIDENCE);
                }
                tracing::debug!(answer, "classifier answer matches no catalog entry");
                Resolution::miss()
            }
            Ok(None) => Resolution::miss(),
            Err(err) => {
                tracing::warn!(error = %err, "country classifier failed, degrading to no match");
                Resolution::miss()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ClassifierError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubClassifier {
        answer: Result<Option<String>, ClassifierError>,
        calls: AtomicUsize,
    }

    impl StubClassifier {
        fn answering(answer: Result<Option<String>, ClassifierError>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CountryClassifier for StubClassifier {
        async fn classify(
            &self,
            _text: &str,
            _candidates: &[&str],
        ) -> Result<Option<String>, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    fn resolver() -> CountryResolver {
        CountryResolver::new(CountryCatalog::builtin())
    }

    #[tokio::test]
    async fn test_exact_catalog_name_full_confidence() {
        let resolution = resolver().resolve("Турция").await;

        assert_eq!(resolution.country, Some(CountryId::new("2")));
        assert_eq!(resolution.confidence, 1.0);
    }

    #[tokio::test]
    async fn test_alias_resolves_without_classifier() {
        let classifier = StubClassifier::answering(Ok(Some("Египет".to_string())));
        let resolver = resolver().with_classifier(classifier.clone());

        let resolution = resolver.resolve("Тай").await;

        assert_eq!(resolution.country, Some(CountryId::new("4")));
        assert!(resolution.confidence >= 0.8);
        assert_eq!(classifier.calls(), 0, "classifier must not be consulted");
    }

    #[tokio::test]
    async fn test_misspelling_resolves_fuzzily() {
        let resolution = resolver().resolve("туриця").await;

        assert_eq!(resolution.country, Some(CountryId::new("2")));
        assert!(resolution.confidence >= 0.8);
        assert!(resolution.confidence < 1.0);
    }

    #[tokio::test]
    async fn test_garbage_with_unknown_classifier_misses() {
        let classifier = StubClassifier::answering(Ok(None));
        let resolver = resolver().with_classifier(classifier.clone());

        let resolution = resolver.resolve("zzz-not-a-country").await;

        assert_eq!(resolution.country, None);
        assert_eq!(resolution.confidence, 0.0);
        assert_eq!(classifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_classifier_answer_matching_catalog_accepted() {
        let classifier = StubClassifier::answering(Ok(Some("таиланд".to_string())));
        let resolver = resolver().with_classifier(classifier);

        let resolution = resolver.resolve("страна улыбок с пляжами").await;

        assert_eq!(resolution.country, Some(CountryId::new("4")));
        assert_eq!(resolution.confidence, 0.8);
    }

    #[tokio::test]
    async fn test_classifier_answer_outside_catalog_misses() {
        let classifier = StubClassifier::answering(Ok(Some("Атлантида".to_string())));
        let resolver = resolver().with_classifier(classifier);

        let resolution = resolver.resolve("какое-то место").await;

        assert_eq!(resolution.country, None);
    }

    #[tokio::test]
    async fn test_classifier_failure_degrades_to_miss() {
        let classifier =
            StubClassifier::answering(Err(ClassifierError::network("connection refused")));
        let resolver = resolver().with_classifier(classifier);

        let resolution = resolver.resolve("qqqqqq").await;

        assert_eq!(resolution.country, None);
        assert_eq!(resolution.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_no_classifier_garbage_misses() {
        let resolution = resolver().resolve("zzz-not-a-country").await;

        assert_eq!(resolution.country, None);
        assert_eq!(resolution.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_empty_input_misses() {
        let resolution = resolver().resolve("   ").await;

        assert_eq!(resolution.country, None);
    }
}
