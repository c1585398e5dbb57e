use crate::{
    adapter::{CodeChefAdapter, CodeforcesAdapter, LeetCodeAdapter, PlatformAdapter},
    model::{Contest, Platform},
};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::time::{self, Duration};

pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of one aggregation pass.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub contests: Vec<Contest>,
    /// Platforms whose adapter failed or timed out during this pass.
    pub unavailable: Vec<Platform>,
}

impl Aggregation {
    pub fn is_degraded(&self) -> bool {
        !self.unavailable.is_empty()
    }

    pub fn is_unavailable(&self, platform: Platform) -> bool {
        self.unavailable.contains(&platform)
    }
}

/// Fans out to every registered adapter and joins their results.
pub struct ContestAggregator {
    adapters: Vec<Box<dyn PlatformAdapter>>,
    timeout: Duration,
}

impl ContestAggregator {
    pub fn new(timeout: Duration) -> Self {
        Self {
            adapters: Vec::new(),
            timeout,
        }
    }

    /// Codeforces, CodeChef and LeetCode, in that order.
    pub fn with_default_adapters(
        codeforces: CodeforcesAdapter,
        timeout: Duration,
    ) -> Self {
        let mut aggregator = Self::new(timeout);
        aggregator
            .register(codeforces)
            .register(CodeChefAdapter::new())
            .register(LeetCodeAdapter::new());
        aggregator
    }

    pub fn register(&mut self, adapter: impl PlatformAdapter + 'static) -> &mut Self {
        self.adapters.push(Box::new(adapter));
        self
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Runs every adapter concurrently and concatenates the results in registration order.
    ///
    /// An adapter exceeding the timeout contributes nothing.
    pub async fn fetch_all_contests(&self, now: DateTime<Utc>) -> Vec<Contest> {
        self.aggregate(now).await.contests
    }

    /// Same as [`ContestAggregator::fetch_all_contests`], also reporting which platforms
    /// could not be reached.
    pub async fn aggregate(&self, now: DateTime<Utc>) -> Aggregation {
        let tasks = self.adapters.iter().map(|adapter| async move {
            let fetched =
                match time::timeout(self.timeout, adapter.try_fetch_platform_contests(now)).await
                {
                    Ok(fetched) => fetched,
                    Err(_) => {
                        tracing::warn!(
                            "{} adapter timed out after {:?}",
                            adapter.platform(),
                            self.timeout
                        );
                        None
                    }
                };
            (adapter.platform(), fetched)
        });

        let mut aggregation = Aggregation::default();
        for (platform, fetched) in join_all(tasks).await {
            match fetched {
                Some(contests) => aggregation.contests.extend(contests),
                None => aggregation.unavailable.push(platform),
            }
        }
        tracing::info!(
            "{} contests aggregated from {} platforms.",
            aggregation.contests.len(),
            self.adapters.len()
        );
        if aggregation.is_degraded() {
            tracing::warn!("unavailable platforms: {:?}", aggregation.unavailable);
        }

        aggregation
    }
}
