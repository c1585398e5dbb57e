use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{skip_serializing_none, DeserializeFromStr, SerializeDisplay};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Contest platforms known to the tracker.
///
/// Serialized with the canonical display name, parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum Platform {
    Codeforces,
    CodeChef,
    LeetCode,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Codeforces, Platform::CodeChef, Platform::LeetCode];

    /// Lowercase identifier used by the platform filter and the admin form.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Codeforces => "codeforces",
            Platform::CodeChef => "codechef",
            Platform::LeetCode => "leetcode",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Codeforces => "Codeforces",
            Platform::CodeChef => "CodeChef",
            Platform::LeetCode => "LeetCode",
        }
    }

    /// Prefix of the contest ids produced by this platform's adapter.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Platform::Codeforces => "cf",
            Platform::CodeChef => "cc",
            Platform::LeetCode => "lc",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown platform `{0}`")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Platform::ALL
            .into_iter()
            .find(|platform| platform.id() == normalized)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// A contest normalized from one of the upstream platforms.
///
/// `duration` is the value declared by the adapter in hours and is not recomputed from the
/// start and end instants.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: String,
    pub name: String,
    pub url: String,
    pub platform: Platform,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: f64,
    pub solution_link: Option<String>,
}

impl Contest {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time > now
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_platform_case_insensitively() {
        assert_eq!("codeforces".parse::<Platform>(), Ok(Platform::Codeforces));
        assert_eq!("CodeChef".parse::<Platform>(), Ok(Platform::CodeChef));
        assert_eq!(" LEETCODE ".parse::<Platform>(), Ok(Platform::LeetCode));
        assert_eq!(
            "atcoder".parse::<Platform>(),
            Err(UnknownPlatform(String::from("atcoder")))
        );
    }

    #[test]
    fn serialize_contest_with_camel_case_keys() {
        let contest = Contest {
            id: String::from("cf-1234"),
            name: String::from("Codeforces Round #789 (Div. 2)"),
            url: String::from("https://codeforces.com/contest/1234"),
            platform: Platform::Codeforces,
            start_time: Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 1, 11, 2, 0, 0).unwrap(),
            duration: 2.0,
            solution_link: None,
        };

        let value = serde_json::to_value(&contest).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "cf-1234",
                "name": "Codeforces Round #789 (Div. 2)",
                "url": "https://codeforces.com/contest/1234",
                "platform": "Codeforces",
                "startTime": "2024-01-11T00:00:00Z",
                "endTime": "2024-01-11T02:00:00Z",
                "duration": 2.0
            })
        );
    }

    #[test]
    fn deserialize_contest_from_browser_timestamps() {
        let json = r#"{
            "id": "lc-weekly344",
            "name": "LeetCode Weekly Contest 344",
            "url": "https://leetcode.com/contest/weekly-contest-344",
            "platform": "leetcode",
            "startTime": "2024-01-03T00:00:00.000Z",
            "endTime": "2024-01-03T01:30:00.000Z",
            "duration": 1.5,
            "solutionLink": "https://www.youtube.com/watch?v=example2"
        }"#;

        let contest: Contest = serde_json::from_str(json).unwrap();
        assert_eq!(contest.platform, Platform::LeetCode);
        assert_eq!(
            contest.start_time,
            Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()
        );
        assert_eq!(
            contest.solution_link.as_deref(),
            Some("https://www.youtube.com/watch?v=example2")
        );
    }
}
