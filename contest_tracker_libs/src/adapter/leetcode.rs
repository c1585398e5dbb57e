use crate::{
    adapter::{PlatformAdapter, Result},
    model::{Contest, Platform},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// LeetCode does not publish its contest schedule through a public API either, so this
/// adapter returns placeholder records as well.
#[derive(Debug, Default)]
pub struct LeetCodeAdapter;

impl LeetCodeAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlatformAdapter for LeetCodeAdapter {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    async fn fetch(&self, now: DateTime<Utc>) -> Result<Vec<Contest>> {
        let in_three_days = now + Duration::days(3);
        let last_week = now - Duration::days(7);
        let length = Duration::minutes(90);

        Ok(vec![
            Contest {
                id: String::from("lc-weekly345"),
                name: String::from("LeetCode Weekly Contest 345"),
                url: String::from("https://leetcode.com/contest/weekly-contest-345"),
                platform: Platform::LeetCode,
                start_time: in_three_days,
                end_time: in_three_days + length,
                duration: 1.5,
                solution_link: None,
            },
            Contest {
                id: String::from("lc-weekly344"),
                name: String::from("LeetCode Weekly Contest 344"),
                url: String::from("https://leetcode.com/contest/weekly-contest-344"),
                platform: Platform::LeetCode,
                start_time: last_week,
                end_time: last_week + length,
                duration: 1.5,
                solution_link: Some(String::from("https://www.youtube.com/watch?v=example2")),
            },
        ])
    }
}
