use crate::model::Platform;
use serde::{Deserialize, Serialize};

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// A video from the solution playlists, already matched to the contest it explains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeVideo {
    pub title: String,
    pub video_id: String,
    pub contest_id: String,
    pub platform: Platform,
}

impl YoutubeVideo {
    pub fn watch_url(&self) -> String {
        format!("{}?v={}", WATCH_URL, self.video_id)
    }
}

/// Candidate solution videos offered for semi-automated linking. Each one refers to a contest
/// the platform adapters list, so it can be attached as is.
///
/// Stands in for a YouTube Data API playlist query, which needs credentials this service does
/// not manage.
pub fn candidate_videos() -> Vec<YoutubeVideo> {
    vec![
        YoutubeVideo {
            title: String::from("CodeChef Starters 41 Solution"),
            video_id: String::from("example1"),
            contest_id: String::from("cc-start41"),
            platform: Platform::CodeChef,
        },
        YoutubeVideo {
            title: String::from("LeetCode Weekly Contest 344 Solution"),
            video_id: String::from("example2"),
            contest_id: String::from("lc-weekly344"),
            platform: Platform::LeetCode,
        },
    ]
}
