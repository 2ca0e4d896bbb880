//! Search module - job tracking, polling policy and result digest.

mod digest;
mod job;
mod policy;

pub use digest::{format_digest, HotelOffer, SearchResults, ENTRY_SEPARATOR};
pub use job::{JobState, JobStatus};
pub use policy::PollPolicy;
