//! Variation index - free-text spellings mapped to canonical country codes.
//!
//! Built once from the country catalog plus a curated alias table, read-only
//! afterwards. Keys are normalized (trimmed, lowercased) at construction and
//! lookups normalize the same way.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::foundation::CountryId;

use super::CountryCatalog;

/// Curated aliases and abbreviations, keyed by canonical country code.
///
/// Covers latin spellings, short forms and common colloquial names for the
/// built-in catalog. Codes absent from a given catalog are simply skipped.
static CURATED_ALIASES: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    table.insert("1", &["egypt", "египет", "хургада", "шарм"]);
    table.insert("2", &["turkey", "турция", "турцыя", "анталия", "анталья"]);
    table.insert("3", &["uae", "оаэ", "эмираты", "дубай", "emirates", "dubai"]);
    table.insert("4", &["thailand", "таиланд", "тайланд", "тай", "пхукет"]);
    table
});

/// Derived lowercase name/alias -> canonical country code mapping.
#[derive(Debug, Clone)]
pub struct VariationIndex {
    entries: HashMap<String, CountryId>,
}

impl VariationIndex {
    /// Builds the index from catalog display names plus the curated aliases.
    pub fn build(catalog: &CountryCatalog) -> Self {
        let mut entries = HashMap::new();

        for (id, name) in catalog.iter() {
            entries.insert(Self::normalize(name), id.clone());

            if let Some(aliases) = CURATED_ALIASES.get(id.as_str()) {
                for alias in aliases.iter() {
                    entries.insert(Self::normalize(alias), id.clone());
                }
            }
        }

        Self { entries }
    }

    /// Exact lookup of a normalized spelling.
    pub fn lookup(&self, input: &str) -> Option<&CountryId> {
        self.entries.get(&Self::normalize(input))
    }

    /// All indexed spellings with their country codes, for fuzzy scans.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryId)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalize(input: &str) -> String {
        input.trim().to_lowercase()
    }
}
