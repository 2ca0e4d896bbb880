//! Search Orchestrator - drives one search job from submission to results.
//!
//! Submission yields a request id, then the job is polled under the
//! [`PollPolicy`]: a fixed pause before every status check, transient
//! provider failures swallowed per attempt, the loop ending on convergence,
//! an explicit rejection, a failed job, or attempt exhaustion. Only a
//! converged job is fetched.

use std::sync::Arc;

use crate::domain::dialogue::SearchParameters;
use crate::domain::search::{JobState, PollPolicy, SearchResults};
use crate::ports::{InventoryProvider, ProviderError};

/// Terminal failures of one search run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// The job could not be submitted at all.
    #[error("search submission failed: {0}")]
    Submission(#[source] ProviderError),

    /// The provider failed the job or rejected a poll outright.
    #[error("search failed: {0}")]
    Provider(#[source] ProviderError),

    /// The job never converged within the attempt budget.
    #[error("search did not converge within {attempts} polls")]
    Timeout { attempts: u32 },
}

/// Runs search jobs against an [`InventoryProvider`].
pub struct SearchOrchestrator {
    provider: Arc<dyn InventoryProvider>,
    policy: PollPolicy,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn InventoryProvider>, policy: PollPolicy) -> Self {
        Self { provider, policy }
    }

    /// Submits a search and polls it to completion.
    pub async fn run(&self, params: &SearchParameters) -> Result<SearchResults, SearchError> {
        let request = self
            .provider
            .submit(params)
            .await
            .map_err(SearchError::Submission)?;

        for attempt in 1..=self.policy.max_attempts {
            tokio::time::sleep(self.policy.interval).await;

            let status = match self.provider.status(&request).await {
                Ok(status) => status,
                Err(err) if err.is_transient() => {
                    tracing::warn!(
                        request = %request,
                        attempt,
                        error = %err,
                        "transient poll failure, retrying"
                    );
                    continue;
                }
                Err(err) => return Err(SearchError::Provider(err)),
            };

            tracing::debug!(
                request = %request,
                attempt,
                state = ?status.state,
                hotels = status.hotels_found,
                tours = status.tours_found,
                "poll"
            );

            if status.state == JobState::Error {
                return Err(SearchError::Provider(ProviderError::rejected(
                    "provider reported a failed search job",
                )));
            }

            if self.policy.is_converged(&status) {
                tracing::info!(
                    request = %request,
                    attempt,
                    hotels = status.hotels_found,
                    tours = status.tours_found,
                    "search converged"
                );
                return self
                    .provider
                    .fetch(&request)
                    .await
                    .map_err(SearchError::Provider);
            }
        }

        Err(SearchError::Timeout {
            attempts: self.policy.max_attempts,
        })
    }
}
