//! Polling policy - the bounds and early-exit rules of the status loop.

use std::time::Duration;

use super::{JobState, JobStatus};

/// Explicit retry policy for the search status loop.
///
/// Convergence accepts a job that is `finished` OR has already collected
/// enough results (both count thresholds met) - an intentional trade of
/// completeness for responsiveness: the digest may render while the provider
/// is still producing more results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Maximum number of status checks before giving up.
    pub max_attempts: u32,
    /// Pause between consecutive status checks.
    pub interval: Duration,
    /// Early-exit threshold on hotels collected.
    pub min_hotels: u32,
    /// Early-exit threshold on tours collected.
    pub min_tours: u32,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, interval: Duration, min_hotels: u32, min_tours: u32) -> Self {
        Self {
            max_attempts,
            interval,
            min_hotels,
            min_tours,
        }
    }

    /// True when this observation ends the polling loop successfully.
    pub fn is_converged(&self, status: &JobStatus) -> bool {
        status.state == JobState::Finished
            || (status.hotels_found >= self.min_hotels && status.tours_found >= self.min_tours)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 24,
            interval: Duration::from_millis(2500),
            min_hotels: 10,
            min_tours: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_always_converges() {
        let policy = PollPolicy::default();
        let status = JobStatus::new(JobState::Finished, 0, 0);
        assert!(policy.is_converged(&status));
    }

    #[test]
    fn test_thresholds_converge_while_pending() {
        let policy = PollPolicy::default();
        assert!(policy.is_converged(&JobStatus::new(JobState::Pending, 10, 30)));
        assert!(policy.is_converged(&JobStatus::new(JobState::Pending, 50, 120)));
    }

    #[test]
    fn test_partial_thresholds_do_not_converge() {
        let policy = PollPolicy::default();
        assert!(!policy.is_converged(&JobStatus::new(JobState::Pending, 10, 29)));
        assert!(!policy.is_converged(&JobStatus::new(JobState::Pending, 9, 30)));
        assert!(!policy.is_converged(&JobStatus::new(JobState::Pending, 0, 0)));
    }

    #[test]
    fn test_error_state_is_not_convergence() {
        let policy = PollPolicy::default();
        assert!(!policy.is_converged(&JobStatus::new(JobState::Error, 0, 0)));
    }

    #[test]
    fn test_defaults_match_provider_tuning() {
        let policy = PollPolicy::default();
        assert_eq!(policy.max_attempts, 24);
        assert_eq!(policy.interval, Duration::from_millis(2500));
        assert_eq!(policy.min_hotels, 10);
        assert_eq!(policy.min_tours, 30);
    }
}
