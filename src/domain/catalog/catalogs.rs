//! Country and departure-city catalogs.
//!
//! Both map the provider's canonical codes to display names. Entries keep
//! insertion order so numbered option lists render deterministically.

use crate::domain::foundation::{CountryId, DepartureId};

/// Immutable mapping from canonical country code to display name.
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    entries: Vec<(CountryId, String)>,
}

impl CountryCatalog {
    /// Builds a catalog from (code, display name) pairs.
    pub fn new(entries: Vec<(CountryId, String)>) -> Self {
        Self { entries }
    }

    /// The built-in destination set understood by the inventory provider.
    pub fn builtin() -> Self {
        Self::new(vec![
            (CountryId::new("1"), "Египет".to_string()),
            (CountryId::new("2"), "Турция".to_string()),
            (CountryId::new("3"), "ОАЭ".to_string()),
            (CountryId::new("4"), "Таиланд".to_string()),
        ])
    }

    /// Display name for a country code, if known.
    pub fn display_name(&self, id: &CountryId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(code, _)| code == id)
            .map(|(_, name)| name.as_str())
    }

    /// Looks a display name up case-insensitively.
    pub fn id_by_name(&self, name: &str) -> Option<&CountryId> {
        let wanted = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(_, n)| n.to_lowercase() == wanted)
            .map(|(id, _)| id)
    }

    /// All display names, in catalog order.
    pub fn display_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, n)| n.as_str()).collect()
    }

    /// Iterates (code, display name) pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&CountryId, &str)> {
        self.entries.iter().map(|(id, n)| (id, n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable mapping from canonical departure-city code to display name.
#[derive(Debug, Clone)]
pub struct DepartureCatalog {
    entries: Vec<(DepartureId, String)>,
}

impl DepartureCatalog {
    pub fn new(entries: Vec<(DepartureId, String)>) -> Self {
        Self { entries }
    }

    /// The built-in departure cities understood by the inventory provider.
    pub fn builtin() -> Self {
        Self::new(vec![
            (DepartureId::new("1"), "Москва".to_string()),
            (DepartureId::new("2"), "Санкт-Петербург".to_string()),
            (DepartureId::new("3"), "Казань".to_string()),
        ])
    }

    /// Display name for a city code, if known.
    pub fn display_name(&self, id: &DepartureId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(code, _)| code == id)
            .map(|(_, name)| name.as_str())
    }

    /// Returns the id when `input` is a listed option number.
    pub fn id_by_option(&self, input: &str) -> Option<&DepartureId> {
        let wanted = input.trim();
        self.entries
            .iter()
            .find(|(id, _)| id.as_str() == wanted)
            .map(|(id, _)| id)
    }

    /// Iterates (code, display name) pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&DepartureId, &str)> {
        self.entries.iter().map(|(id, n)| (id, n.as_str()))
    }
}
