use crate::model::{Contest, Platform};
use chrono::{DateTime, Duration, Utc};

/// Where the contests shown to the user came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestSource {
    Live,
    Fallback,
}

/// Contest list together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestFeed {
    pub contests: Vec<Contest>,
    pub source: ContestSource,
}

impl ContestFeed {
    /// Substitutes the fixed local dataset when fetching failed.
    pub fn from_fetch<E: std::fmt::Debug>(
        result: Result<Vec<Contest>, E>,
        now: DateTime<Utc>,
    ) -> Self {
        match result {
            Ok(contests) => Self {
                contests,
                source: ContestSource::Live,
            },
            Err(e) => {
                tracing::warn!("Failed to fetch contests, showing local data instead: {:?}", e);
                Self {
                    contests: fallback_contests(now),
                    source: ContestSource::Fallback,
                }
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ContestSource::Fallback
    }
}

fn mock(
    id: &str,
    name: &str,
    url: &str,
    platform: Platform,
    start_time: DateTime<Utc>,
    minutes: i64,
    solution_link: Option<&str>,
) -> Contest {
    Contest {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        platform,
        start_time,
        end_time: start_time + Duration::minutes(minutes),
        duration: minutes as f64 / 60.0,
        solution_link: solution_link.map(String::from),
    }
}

/// Local dataset anchored to `now`: three upcoming and three past contests.
pub fn fallback_contests(now: DateTime<Utc>) -> Vec<Contest> {
    let tomorrow = now + Duration::days(1);
    let next_week = now + Duration::days(7);
    let yesterday = now - Duration::days(1);
    let last_week = now - Duration::days(7);

    vec![
        mock(
            "cf-1234",
            "Codeforces Round #789 (Div. 2)",
            "https://codeforces.com/contests/1234",
            Platform::Codeforces,
            tomorrow,
            120,
            None,
        ),
        mock(
            "cc-5678",
            "CodeChef Starters 42",
            "https://www.codechef.com/START42",
            Platform::CodeChef,
            next_week,
            180,
            None,
        ),
        mock(
            "lc-9012",
            "LeetCode Weekly Contest 345",
            "https://leetcode.com/contest/weekly-contest-345",
            Platform::LeetCode,
            tomorrow + Duration::days(3),
            90,
            None,
        ),
        mock(
            "cf-1111",
            "Codeforces Round #788 (Div. 1)",
            "https://codeforces.com/contests/1111",
            Platform::Codeforces,
            yesterday,
            120,
            Some("https://www.youtube.com/watch?v=example1"),
        ),
        mock(
            "cc-2222",
            "CodeChef Starters 41",
            "https://www.codechef.com/START41",
            Platform::CodeChef,
            last_week,
            180,
            None,
        ),
        mock(
            "lc-3333",
            "LeetCode Weekly Contest 344",
            "https://leetcode.com/contest/weekly-contest-344",
            Platform::LeetCode,
            last_week - Duration::days(3),
            90,
            Some("https://www.youtube.com/watch?v=example2"),
        ),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn fallback_has_upcoming_and_past_contests() {
        let contests = fallback_contests(now());

        assert_eq!(contests.len(), 6);
        assert_eq!(contests.iter().filter(|c| c.is_upcoming(now())).count(), 3);
        assert!(contests.iter().all(|c| c.end_time > c.start_time));
    }

    #[test]
    fn live_result_is_kept() {
        let feed = ContestFeed::from_fetch::<String>(Ok(Vec::new()), now());

        assert_eq!(feed.source, ContestSource::Live);
        assert!(feed.contests.is_empty());
    }

    #[test]
    fn error_is_replaced_by_fallback() {
        let feed = ContestFeed::from_fetch::<String>(
            Err(String::from("Error fetching contests: Internal Server Error")),
            now(),
        );

        assert!(feed.is_fallback());
        assert_eq!(feed.contests, fallback_contests(now()));
    }
}
