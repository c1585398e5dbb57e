pub mod codechef;
pub mod codeforces;
pub mod leetcode;

pub use codechef::CodeChefAdapter;
pub use codeforces::CodeforcesAdapter;
pub use leetcode::LeetCodeAdapter;

use crate::model::{Contest, Platform};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdapterError>;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("failed to request to upstream platform")]
    RequestError(#[from] reqwest::Error),
    #[error("failed to deserialize JSON data")]
    DeserializeError(#[from] serde_json::Error),
    #[error("invalid upstream url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("upstream platform returned an error: {0}")]
    UpstreamError(String),
}

/// Translates one upstream platform's contest data into [`Contest`] records.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    async fn fetch(&self, now: DateTime<Utc>) -> Result<Vec<Contest>>;

    /// Like [`PlatformAdapter::fetch`], but the error is logged and reported as `None`.
    async fn try_fetch_platform_contests(&self, now: DateTime<Utc>) -> Option<Vec<Contest>> {
        match self.fetch(now).await {
            Ok(contests) => {
                tracing::info!(
                    "{} contests retrieved from {}.",
                    contests.len(),
                    self.platform()
                );
                Some(contests)
            }
            Err(e) => {
                tracing::error!("Error fetching {} contests: {:?}", self.platform(), e);
                None
            }
        }
    }

    /// Never fails: any error is logged and turned into an empty list so that one
    /// broken source does not take the whole aggregation down.
    async fn fetch_platform_contests(&self, now: DateTime<Utc>) -> Vec<Contest> {
        self.try_fetch_platform_contests(now)
            .await
            .unwrap_or_default()
    }
}
