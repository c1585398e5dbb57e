pub mod bookmark;
pub mod link;
pub mod list;
pub mod server;
pub mod solution;

use clap::ValueEnum;
use std::{env, fmt};

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Upcoming,
    Past,
    Bookmarked,
    All,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tab::Upcoming => write!(f, "upcoming"),
            Tab::Past => write!(f, "past"),
            Tab::Bookmarked => write!(f, "bookmarked"),
            Tab::All => write!(f, "all"),
        }
    }
}

/// Reads an environment variable, falling back to `default` with a warning.
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        tracing::warn!(
            "{} environment variable is not set. Default value `{}` will be used.",
            key,
            default
        );
        String::from(default)
    })
}

pub fn contest_api_url() -> String {
    env_or_default("CONTEST_API_URL", "http://localhost:8000")
}

pub fn bookmark_storage_path() -> String {
    env_or_default("BOOKMARK_STORAGE_PATH", "bookmarks.json")
}
