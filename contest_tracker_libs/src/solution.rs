use crate::model::Platform;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use url::Url;
use validator::{Validate, ValidationError};

// 動画リンクとして受け付けるホスト
static VIDEO_HOSTS: Lazy<HashSet<&str>> = Lazy::new(|| {
    HashSet::from([
        "youtube.com",
        "www.youtube.com",
        "m.youtube.com",
        "youtu.be",
    ])
});

static VIDEO_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

fn validate_platform(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<Platform>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("unknown platform"))
    }
}

/// Extracts the video id from a YouTube link, or `None` when the link does not point at a
/// video on a known host.
pub fn video_id(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    if !VIDEO_HOSTS.contains(host) {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let id = if host == "youtu.be" {
        segments.next().map(String::from)
    } else {
        match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("live") | Some("shorts") | Some("embed") => segments.next().map(String::from),
            _ => None,
        }
    }?;

    VIDEO_ID.is_match(&id).then_some(id)
}

fn validate_youtube_link(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || video_id(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("not a YouTube video link"))
    }
}

fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Request to attach a solution video to a contest.
///
/// Missing fields deserialize to empty strings so that they are reported by validation.
/// Surrounding whitespace is dropped both here and in [`SolutionLinkRequest::new`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SolutionLinkRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "contestId is required"))]
    pub contest_id: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 1, message = "platform is required"),
        custom = "validate_platform"
    )]
    pub platform: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 1, message = "youtubeLink is required"),
        custom = "validate_youtube_link"
    )]
    pub youtube_link: String,
}

impl SolutionLinkRequest {
    pub fn new(
        contest_id: impl ToString,
        platform: impl ToString,
        youtube_link: impl ToString,
    ) -> Self {
        Self {
            contest_id: contest_id.to_string().trim().to_string(),
            platform: platform.to_string().trim().to_string(),
            youtube_link: youtube_link.to_string().trim().to_string(),
        }
    }

    pub fn has_missing_fields(&self) -> bool {
        self.contest_id.is_empty() || self.platform.is_empty() || self.youtube_link.is_empty()
    }
}

type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access solution store file")]
    IoError(#[from] std::io::Error),
    #[error("failed to (de)serialize solution store content")]
    SerializeError(#[from] serde_json::Error),
}

/// Durable association between contest ids and solution video links.
///
/// Writes are visible to the next `load`.
#[async_trait]
pub trait SolutionLinkStore: Send + Sync {
    async fn load(&self) -> Result<BTreeMap<String, String>>;
    async fn save(&self, contest_id: &str, link: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemorySolutionStore {
    links: RwLock<BTreeMap<String, String>>,
}

impl InMemorySolutionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SolutionLinkStore for InMemorySolutionStore {
    async fn load(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.links.read().await.clone())
    }

    async fn save(&self, contest_id: &str, link: &str) -> Result<()> {
        self.links
            .write()
            .await
            .insert(contest_id.to_string(), link.to_string());
        Ok(())
    }
}

/// Stores links as a JSON object `{contestId: link}` in one file.
///
/// Writes go to a sibling temporary file which is then renamed over the original.
#[derive(Debug)]
pub struct JsonFileSolutionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileSolutionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(content) => Ok(serde_json::from_slice(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }
}

#[async_trait]
impl SolutionLinkStore for JsonFileSolutionStore {
    async fn load(&self) -> Result<BTreeMap<String, String>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn save(&self, contest_id: &str, link: &str) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut links = self.read().await?;
        links.insert(contest_id.to_string(), link.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let temporary = self.path.with_extension("json.tmp");
        tokio::fs::write(&temporary, serde_json::to_vec_pretty(&links)?).await?;
        tokio::fs::rename(&temporary, &self.path).await?;

        tracing::info!(
            "Solution link for {} saved to {}",
            contest_id,
            self.path.display()
        );
        Ok(())
    }
}
