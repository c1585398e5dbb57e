use crate::{
    adapter::{AdapterError, PlatformAdapter, Result},
    model::{Contest, Platform},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::time::Duration;

pub const DEFAULT_CODEFORCES_HOST: &str = "https://codeforces.com";

/// Finished contests which started within this many days are still listed.
const RECENT_CONTEST_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub struct CodeforcesResponse {
    pub status: String,
    pub comment: Option<String>,
    pub result: Option<Vec<CodeforcesContest>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesContest {
    pub id: i64,
    pub name: String,
    pub phase: String,
    pub duration_seconds: i64,
    pub start_time_seconds: Option<i64>,
}

impl CodeforcesContest {
    fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time_seconds
            .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single())
    }

    /// Keeps contests which are not finished yet, or which started recently enough to be
    /// worth showing in the past list.
    fn is_relevant(&self, start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        !self.phase.contains("FINISHED")
            || start_time > now - ChronoDuration::days(RECENT_CONTEST_DAYS)
    }

    fn to_contest(&self, now: DateTime<Utc>) -> Option<Contest> {
        let start_time = match self.start_time() {
            Some(start_time) => start_time,
            None => {
                tracing::debug!("Codeforces contest {} has no start time", self.id);
                return None;
            }
        };
        if self.duration_seconds <= 0 {
            tracing::warn!(
                "Codeforces contest {} has non-positive duration {}",
                self.id,
                self.duration_seconds
            );
            return None;
        }
        if !self.is_relevant(start_time, now) {
            return None;
        }

        Some(Contest {
            id: format!("{}-{}", Platform::Codeforces.id_prefix(), self.id),
            name: self.name.clone(),
            url: format!("{}/contest/{}", DEFAULT_CODEFORCES_HOST, self.id),
            platform: Platform::Codeforces,
            start_time,
            end_time: start_time + ChronoDuration::seconds(self.duration_seconds),
            duration: self.duration_seconds as f64 / 3600.0,
            solution_link: None,
        })
    }
}

/// Converts the body of `contest.list` into contests, applying the recency filter.
pub fn parse_contest_list(body: &str, now: DateTime<Utc>) -> Result<Vec<Contest>> {
    let response: CodeforcesResponse = serde_json::from_str(body)?;
    if response.status != "OK" {
        return Err(AdapterError::UpstreamError(
            response
                .comment
                .unwrap_or_else(|| String::from("Codeforces API error")),
        ));
    }

    Ok(response
        .result
        .unwrap_or_default()
        .iter()
        .filter_map(|contest| contest.to_contest(now))
        .collect())
}

pub struct CodeforcesAdapter {
    url: Url,
    client: Client,
}

impl CodeforcesAdapter {
    pub fn new(host: &str) -> Result<Self> {
        let url = Url::parse(host)?.join("api/contest.list")?;
        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PlatformAdapter for CodeforcesAdapter {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    /// Codeforcesのコンテスト一覧APIからコンテスト情報を取得する
    async fn fetch(&self, now: DateTime<Utc>) -> Result<Vec<Contest>> {
        tracing::info!("Start to retrieve contests information from {}", self.url);
        let res = self.client.get(self.url.clone()).send().await?;
        let res = res.error_for_status()?;
        let body = res.text().await?;

        parse_contest_list(&body, now)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::{http::StatusCode, routing, Router, Server};
    use std::net::SocketAddr;

    /// Serves `app` on an ephemeral local port and returns its base url.
    async fn serve(app: Router) -> String {
        let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        format!("http://{}", addr)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn create_new_adapter() {
        let adapter = CodeforcesAdapter::new("https://codeforces.com").unwrap();
        assert_eq!(
            adapter.url(),
            &Url::parse("https://codeforces.com/api/contest.list").unwrap()
        );
    }

    #[test]
    fn keep_running_and_recent_contests() {
        // 2024-01-11T00:00:00Z, 2023-12-31T00:00:00Z, 2023-11-01T00:00:00Z
        let body = r#"{
            "status": "OK",
            "result": [
                {"id": 1920, "name": "Codeforces Round 920", "type": "CF", "phase": "BEFORE", "frozen": false, "durationSeconds": 7200, "startTimeSeconds": 1704931200},
                {"id": 1915, "name": "Codeforces Round 915", "type": "CF", "phase": "FINISHED", "frozen": false, "durationSeconds": 9000, "startTimeSeconds": 1703980800},
                {"id": 1890, "name": "Codeforces Round 890", "type": "CF", "phase": "FINISHED", "frozen": false, "durationSeconds": 7200, "startTimeSeconds": 1698796800},
                {"id": 1900, "name": "Gym without schedule", "type": "ICPC", "phase": "BEFORE", "frozen": false, "durationSeconds": 7200}
            ]
        }"#;

        let contests = parse_contest_list(body, now()).unwrap();
        let ids: Vec<&str> = contests.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["cf-1920", "cf-1915"]);

        let upcoming = &contests[0];
        assert_eq!(upcoming.url, "https://codeforces.com/contest/1920");
        assert_eq!(upcoming.platform, Platform::Codeforces);
        assert_eq!(
            upcoming.start_time,
            Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap()
        );
        assert_eq!(
            upcoming.end_time,
            Utc.with_ymd_and_hms(2024, 1, 11, 2, 0, 0).unwrap()
        );
        assert_eq!(upcoming.duration, 2.0);
        assert_eq!(contests[1].duration, 2.5);
    }

    #[test]
    fn running_contest_is_kept_regardless_of_age() {
        let body = r#"{
            "status": "OK",
            "result": [
                {"id": 1000, "name": "Long challenge", "phase": "CODING", "durationSeconds": 8640000, "startTimeSeconds": 1698796800}
            ]
        }"#;

        let contests = parse_contest_list(body, now()).unwrap();
        assert_eq!(contests.len(), 1);
    }

    #[test]
    fn skip_contest_with_invalid_duration() {
        let body = r#"{
            "status": "OK",
            "result": [
                {"id": 1001, "name": "Broken", "phase": "BEFORE", "durationSeconds": 0, "startTimeSeconds": 1704931200}
            ]
        }"#;

        assert!(parse_contest_list(body, now()).unwrap().is_empty());
    }

    #[test]
    fn failed_status_is_an_error() {
        let body = r#"{"status": "FAILED", "comment": "Call limit exceeded"}"#;

        match parse_contest_list(body, now()) {
            Err(AdapterError::UpstreamError(message)) => {
                assert_eq!(message, "Call limit exceeded")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            parse_contest_list("<html>maintenance</html>", now()),
            Err(AdapterError::DeserializeError(_))
        ));
    }

    #[tokio::test]
    async fn fetch_from_contest_list_endpoint() {
        let app = Router::new().route(
            "/api/contest.list",
            routing::get(|| async {
                r#"{"status": "OK", "result": [
                    {"id": 1920, "name": "Codeforces Round 920", "phase": "BEFORE", "durationSeconds": 7200, "startTimeSeconds": 1704931200}
                ]}"#
            }),
        );
        let adapter = CodeforcesAdapter::new(&serve(app).await).unwrap();

        let contests = adapter.fetch_platform_contests(now()).await;
        assert_eq!(contests.len(), 1);
        assert_eq!(contests[0].id, "cf-1920");
    }

    #[tokio::test]
    async fn error_status_degrades_to_empty_list() {
        let app = Router::new().route(
            "/api/contest.list",
            routing::get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let adapter = CodeforcesAdapter::new(&serve(app).await).unwrap();

        assert!(matches!(
            adapter.fetch(now()).await,
            Err(AdapterError::RequestError(e)) if e.status() == Some(reqwest::StatusCode::SERVICE_UNAVAILABLE)
        ));
        assert!(adapter.fetch_platform_contests(now()).await.is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn test_fetch_live_contest_list() {
        let adapter = CodeforcesAdapter::new(DEFAULT_CODEFORCES_HOST).unwrap();
        let contests = adapter.fetch(Utc::now()).await.unwrap();

        assert!(contests
            .iter()
            .all(|contest| contest.end_time > contest.start_time));
    }
}
