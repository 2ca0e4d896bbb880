//! Catalog module - Static reference data for the dialogue.
//!
//! Country and departure-city catalogs are loaded once at process start and
//! are immutable for the process lifetime. The [`VariationIndex`] derived
//! from the country catalog powers free-text country resolution.

mod catalogs;
mod trip_length;
mod variations;

pub use catalogs::{CountryCatalog, DepartureCatalog};
pub use trip_length::TripLength;
pub use variations::VariationIndex;
