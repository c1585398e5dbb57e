use crate::{
    aggregator::ContestAggregator,
    model::{Contest, Platform, UnknownPlatform},
    solution::{SolutionLinkRequest, SolutionLinkStore, StoreError},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid solution link request: {0}")]
    ValidationError(#[from] ValidationErrors),
    #[error(transparent)]
    UnknownPlatform(#[from] UnknownPlatform),
    #[error("contest {0} not found")]
    ContestNotFound(String),
    #[error("contests of {0} are unavailable right now")]
    PlatformUnavailable(Platform),
    #[error("contest {contest_id} belongs to {actual}, not {requested}")]
    PlatformMismatch {
        contest_id: String,
        requested: Platform,
        actual: Platform,
    },
    #[error("solution store is unavailable")]
    StoreError(#[from] StoreError),
}

/// Aggregated contests with stored solution links applied.
pub struct ContestService {
    aggregator: ContestAggregator,
    store: Arc<dyn SolutionLinkStore>,
}

impl ContestService {
    pub fn new(aggregator: ContestAggregator, store: Arc<dyn SolutionLinkStore>) -> Self {
        Self { aggregator, store }
    }

    /// Fetches every platform and overlays the solution links saved so far.
    ///
    /// A link saved by [`ContestService::attach_solution_link`] is visible to the very next call.
    pub async fn contests(&self, now: DateTime<Utc>) -> Result<Vec<Contest>> {
        let (mut contests, links) =
            tokio::join!(self.aggregator.fetch_all_contests(now), self.store.load());
        let links = links?;

        for contest in contests.iter_mut() {
            if let Some(link) = links.get(&contest.id) {
                contest.solution_link = Some(link.clone());
            }
        }

        Ok(contests)
    }

    /// Validates the request against the current contest list and persists the link.
    pub async fn attach_solution_link(
        &self,
        request: &SolutionLinkRequest,
        now: DateTime<Utc>,
    ) -> Result<()> {
        request.validate()?;
        let requested: Platform = request.platform.parse()?;

        let aggregation = self.aggregator.aggregate(now).await;
        let contest = match aggregation
            .contests
            .iter()
            .find(|contest| contest.id == request.contest_id)
        {
            Some(contest) => contest,
            None if aggregation.is_unavailable(requested) => {
                tracing::warn!(
                    "couldn't look up {} since {} is unavailable",
                    request.contest_id,
                    requested
                );
                return Err(ServiceError::PlatformUnavailable(requested));
            }
            None => {
                if aggregation.is_degraded() {
                    tracing::warn!(
                        "{} was looked up without {:?}",
                        request.contest_id,
                        aggregation.unavailable
                    );
                }
                return Err(ServiceError::ContestNotFound(request.contest_id.clone()));
            }
        };

        if contest.platform != requested {
            return Err(ServiceError::PlatformMismatch {
                contest_id: contest.id.clone(),
                requested,
                actual: contest.platform,
            });
        }

        self.store
            .save(&request.contest_id, &request.youtube_link)
            .await?;
        tracing::info!(
            "Solution link {} attached to {}",
            request.youtube_link,
            request.contest_id
        );

        Ok(())
    }
}
