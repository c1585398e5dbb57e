use crate::{
    adapter::{PlatformAdapter, Result},
    model::{Contest, Platform},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// CodeChef has no public contest API. Until a scraper exists this adapter produces
/// placeholder records anchored to the current instant.
#[derive(Debug, Default)]
pub struct CodeChefAdapter;

impl CodeChefAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlatformAdapter for CodeChefAdapter {
    fn platform(&self) -> Platform {
        Platform::CodeChef
    }

    async fn fetch(&self, now: DateTime<Utc>) -> Result<Vec<Contest>> {
        let next_week = now + Duration::days(7);
        let yesterday = now - Duration::days(1);

        Ok(vec![
            Contest {
                id: String::from("cc-start42"),
                name: String::from("CodeChef Starters 42"),
                url: String::from("https://www.codechef.com/START42"),
                platform: Platform::CodeChef,
                start_time: next_week,
                end_time: next_week + Duration::hours(3),
                duration: 3.0,
                solution_link: None,
            },
            Contest {
                id: String::from("cc-start41"),
                name: String::from("CodeChef Starters 41"),
                url: String::from("https://www.codechef.com/START41"),
                platform: Platform::CodeChef,
                start_time: yesterday,
                end_time: yesterday + Duration::hours(3),
                duration: 3.0,
                solution_link: None,
            },
        ])
    }
}
