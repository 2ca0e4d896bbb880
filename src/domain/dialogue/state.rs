//! Conversation state - a sum type with one variant per dialogue step.
//!
//! Each variant carries exactly the data collected up to that step, so an
//! illegal state/data combination (say, a confirmation without a country)
//! cannot be represented at all. Progression is strictly forward along one
//! ordered edge set; the only backward edges are the explicit resets to
//! `Init` (decline at confirmation, "new search" command).

use chrono::NaiveDate;

use crate::domain::catalog::TripLength;
use crate::domain::foundation::{CountryId, DepartureId};

use super::params::{ParamsError, SearchParameters};

/// A medium-confidence resolver hit awaiting the user's yes/no.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryCandidate {
    pub id: CountryId,
    pub display_name: String,
}

/// Everything collected once the last question is answered.
///
/// Dates stay optional until finalization: when the user never picked an
/// explicit window, the default forward-looking one is computed then.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamsDraft {
    pub departure: DepartureId,
    pub country: CountryId,
    pub trip_length: TripLength,
    pub adults: u8,
    pub children: u8,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ParamsDraft {
    /// Finalizes the draft into immutable, validated search parameters.
    pub fn finalize(&self, today: NaiveDate) -> Result<SearchParameters, ParamsError> {
        let (date_from, date_to) = match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => (from, to),
            _ => SearchParameters::default_date_window(today),
        };
        let (nights_from, nights_to) = self.trip_length.nights();

        SearchParameters::new(
            self.departure.clone(),
            self.country.clone(),
            date_from,
            date_to,
            nights_from,
            nights_to,
            self.adults,
            self.children,
        )
    }
}

/// The dialogue state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationState {
    /// Nothing asked yet; the next turn greets and starts the questions.
    Init,
    /// Waiting for a departure-city option.
    AskDeparture,
    /// Waiting for a destination country (free text). `pending` holds a
    /// medium-confidence candidate during the disambiguation sub-step.
    AskCountry {
        departure: DepartureId,
        pending: Option<CountryCandidate>,
    },
    /// Waiting for a trip-length option.
    AskTripLength {
        departure: DepartureId,
        country: CountryId,
    },
    /// Waiting for the adult count.
    AskAdults {
        departure: DepartureId,
        country: CountryId,
        trip_length: TripLength,
    },
    /// Waiting for the child count.
    AskChildren {
        departure: DepartureId,
        country: CountryId,
        trip_length: TripLength,
        adults: u8,
    },
    /// Waiting for the final yes/no before submitting the search.
    Confirm { draft: ParamsDraft },
    /// Parameters handed off; a search job is running.
    Searching,
}

impl ConversationState {
    pub fn phase(&self) -> Phase {
        match self {
            ConversationState::Init => Phase::Init,
            ConversationState::AskDeparture => Phase::AskDeparture,
            ConversationState::AskCountry { .. } => Phase::AskCountry,
            ConversationState::AskTripLength { .. } => Phase::AskTripLength,
            ConversationState::AskAdults { .. } => Phase::AskAdults,
            ConversationState::AskChildren { .. } => Phase::AskChildren,
            ConversationState::Confirm { .. } => Phase::Confirm,
            ConversationState::Searching => Phase::Searching,
        }
    }
}

/// Data-free view of the state, for transition checks and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Init,
    AskDeparture,
    AskCountry,
    AskTripLength,
    AskAdults,
    AskChildren,
    Confirm,
    Searching,
}

impl Phase {
    /// The single forward edge out of this phase, if any.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Init => Some(Phase::AskDeparture),
            Phase::AskDeparture => Some(Phase::AskCountry),
            Phase::AskCountry => Some(Phase::AskTripLength),
            Phase::AskTripLength => Some(Phase::AskAdults),
            Phase::AskAdults => Some(Phase::AskChildren),
            Phase::AskChildren => Some(Phase::Confirm),
            Phase::Confirm => Some(Phase::Searching),
            Phase::Searching => None,
        }
    }

    /// True for the defined edge set: staying put (retry-in-place), the
    /// forward edge, and the explicit resets back to the start.
    pub fn can_transition_to(&self, target: Phase) -> bool {
        if target == *self || matches!(target, Phase::Init | Phase::AskDeparture) {
            return true;
        }
        self.next() == Some(target)
    }
}
