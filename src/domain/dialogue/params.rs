//! Search parameters - the validated output of a completed dialogue.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CountryId, DepartureId};

/// Bounds on the travelling party.
pub const MIN_ADULTS: u8 = 1;
pub const MAX_ADULTS: u8 = 6;
pub const MAX_CHILDREN: u8 = 4;

/// Days ahead of today the default search window starts.
const DEFAULT_WINDOW_OFFSET_DAYS: i64 = 1;
/// Length of the default search window.
const DEFAULT_WINDOW_LENGTH_DAYS: i64 = 30;

/// Validation failures while finalizing search parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    #[error("adults must be between {MIN_ADULTS} and {MAX_ADULTS}, got {0}")]
    AdultsOutOfRange(u8),

    #[error("children must be at most {MAX_CHILDREN}, got {0}")]
    ChildrenOutOfRange(u8),

    #[error("nights range inverted: {from} > {to}")]
    NightsInverted { from: u8, to: u8 },

    #[error("date range inverted: {from} > {to}")]
    DatesInverted { from: NaiveDate, to: NaiveDate },
}

/// Finalized travel-search parameters.
///
/// Immutable once constructed; [`SearchParameters::new`] is the only way to
/// build one and range-validates every field, so a search job can never be
/// submitted with unchecked input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    departure: DepartureId,
    country: CountryId,
    date_from: NaiveDate,
    date_to: NaiveDate,
    nights_from: u8,
    nights_to: u8,
    adults: u8,
    children: u8,
}

impl SearchParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        departure: DepartureId,
        country: CountryId,
        date_from: NaiveDate,
        date_to: NaiveDate,
        nights_from: u8,
        nights_to: u8,
        adults: u8,
        children: u8,
    ) -> Result<Self, ParamsError> {
        if !(MIN_ADULTS..=MAX_ADULTS).contains(&adults) {
            return Err(ParamsError::AdultsOutOfRange(adults));
        }
        if children > MAX_CHILDREN {
            return Err(ParamsError::ChildrenOutOfRange(children));
        }
        if nights_from > nights_to {
            return Err(ParamsError::NightsInverted {
                from: nights_from,
                to: nights_to,
            });
        }
        if date_from > date_to {
            return Err(ParamsError::DatesInverted {
                from: date_from,
                to: date_to,
            });
        }

        Ok(Self {
            departure,
            country,
            date_from,
            date_to,
            nights_from,
            nights_to,
            adults,
            children,
        })
    }

    /// The default forward-looking search window when the user never picked
    /// explicit dates: tomorrow through tomorrow + 30 days.
    pub fn default_date_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let from = today + Duration::days(DEFAULT_WINDOW_OFFSET_DAYS);
        let to = from + Duration::days(DEFAULT_WINDOW_LENGTH_DAYS);
        (from, to)
    }

    pub fn departure(&self) -> &DepartureId {
        &self.departure
    }

    pub fn country(&self) -> &CountryId {
        &self.country
    }

    pub fn date_from(&self) -> NaiveDate {
        self.date_from
    }

    pub fn date_to(&self) -> NaiveDate {
        self.date_to
    }

    pub fn nights_from(&self) -> u8 {
        self.nights_from
    }

    pub fn nights_to(&self) -> u8 {
        self.nights_to
    }

    pub fn adults(&self) -> u8 {
        self.adults
    }

    pub fn children(&self) -> u8 {
        self.children
    }
}
