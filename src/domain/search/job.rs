//! Search job status as reported by the inventory provider.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one in-flight search job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Still collecting results.
    Pending,
    /// Search finished; results are complete.
    Finished,
    /// Provider reported a business error for this job.
    Error,
}

impl JobState {
    /// Maps the provider's wire value; anything unrecognized counts as
    /// still-pending rather than a parse failure.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "finished" => JobState::Finished,
            "error" => JobState::Error,
            _ => JobState::Pending,
        }
    }
}

/// One poll observation of a search job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub state: JobState,
    pub hotels_found: u32,
    pub tours_found: u32,
    /// Minimum price across collected results so far, when reported.
    pub min_price: Option<u64>,
}

impl JobStatus {
    pub fn new(state: JobState, hotels_found: u32, tours_found: u32) -> Self {
        Self {
            state,
            hotels_found,
            tours_found,
            min_price: None,
        }
    }

    pub fn with_min_price(mut self, min_price: u64) -> Self {
        self.min_price = Some(min_price);
        self
    }
}
