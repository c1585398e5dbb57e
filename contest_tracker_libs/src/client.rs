use crate::{
    api::ErrorResponse, fallback::ContestFeed, model::Contest, solution::SolutionLinkRequest,
    youtube::YoutubeVideo,
};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::Duration;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("failed to build HTTP client")]
    BuildError(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to request to contest API")]
    RequestError(#[from] reqwest::Error),
    #[error("contest API responded with {status}: {message}")]
    ErrorStatus { status: StatusCode, message: String },
}

#[derive(Debug, Error)]
pub enum SolutionLinkError {
    /// Rejected locally; nothing was sent.
    #[error("invalid solution link: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("solution link rejected with {status}: {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("contest API is unreachable")]
    Unreachable(#[from] reqwest::Error),
}

/// HTTP client for the contest API, used by the presentation layer.
pub struct ContestApiClient {
    contests_url: Url,
    solution_url: Url,
    youtube_url: Url,
    client: Client,
}

impl ContestApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        base_url.set_path("");
        let contests_url = base_url.join("api/contests")?;
        let solution_url = base_url.join("api/contests/solution")?;
        let youtube_url = base_url.join("api/youtube")?;
        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            contests_url,
            solution_url,
            youtube_url,
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let res = self.client.get(url.clone()).send().await?;
        match res.error_for_status_ref() {
            Ok(_) => Ok(res.json().await?),
            Err(_) => {
                let status = res.status();
                Err(FetchError::ErrorStatus {
                    status,
                    message: error_message(res).await,
                })
            }
        }
    }

    pub async fn fetch_contests(&self) -> Result<Vec<Contest>, FetchError> {
        self.get_json(&self.contests_url).await
    }

    /// Fetches contests, falling back to the local dataset when the API cannot be used.
    pub async fn fetch_contests_or_fallback(&self, now: DateTime<Utc>) -> ContestFeed {
        ContestFeed::from_fetch(self.fetch_contests().await, now)
    }

    pub async fn fetch_youtube_videos(&self) -> Result<Vec<YoutubeVideo>, FetchError> {
        self.get_json(&self.youtube_url).await
    }

    /// Submits a solution link. The request is validated first and nothing is sent when
    /// validation fails.
    pub async fn add_solution_link(
        &self,
        contest_id: &str,
        platform: &str,
        youtube_link: &str,
    ) -> Result<(), SolutionLinkError> {
        let request = SolutionLinkRequest::new(contest_id, platform, youtube_link);
        request.validate()?;

        let res = self
            .client
            .post(self.solution_url.clone())
            .json(&request)
            .send()
            .await?;
        match res.error_for_status_ref() {
            Ok(_) => Ok(()),
            Err(_) => {
                let status = res.status();
                Err(SolutionLinkError::Rejected {
                    status,
                    message: error_message(res).await,
                })
            }
        }
    }
}

async fn error_message(res: reqwest::Response) -> String {
    let reason = res
        .status()
        .canonical_reason()
        .unwrap_or_default()
        .to_string();
    res.json::<ErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or(reason)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fallback::fallback_contests;
    use axum::{routing, Json, Router, Server};
    use serde_json::json;
    use std::net::SocketAddr;

    // nothing listens on the discard port, so any request would fail as unreachable
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    /// Serves `app` on an ephemeral local port and returns its base url.
    async fn serve(app: Router) -> String {
        let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        format!("http://{}", addr)
    }

    fn broken_api() -> Router {
        Router::new()
            .route(
                "/api/contests",
                routing::get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"error": "Failed to fetch contests"})),
                    )
                }),
            )
            .route(
                "/api/contests/solution",
                routing::post(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": "contest cf-1920 not found"})),
                    )
                }),
            )
    }

    #[test]
    fn create_new_client() {
        let client = ContestApiClient::new("http://localhost:8000/").unwrap();

        assert_eq!(
            client.contests_url,
            Url::parse("http://localhost:8000/api/contests").unwrap()
        );
        assert_eq!(
            client.solution_url,
            Url::parse("http://localhost:8000/api/contests/solution").unwrap()
        );
        assert_eq!(
            client.youtube_url,
            Url::parse("http://localhost:8000/api/youtube").unwrap()
        );
    }

    #[tokio::test]
    async fn empty_fields_are_rejected_without_request() {
        let client = ContestApiClient::new(UNREACHABLE).unwrap();

        for (contest_id, platform, link) in [
            ("", "codeforces", "https://youtu.be/example1"),
            ("cf-1111", "", "https://youtu.be/example1"),
            ("cf-1111", "codeforces", ""),
        ] {
            let result = client.add_solution_link(contest_id, platform, link).await;
            assert!(
                matches!(result, Err(SolutionLinkError::Validation(_))),
                "unexpected result {:?}",
                result
            );
        }
    }

    #[tokio::test]
    async fn non_video_link_is_rejected_without_request() {
        let client = ContestApiClient::new(UNREACHABLE).unwrap();
        let result = client
            .add_solution_link("cf-1111", "codeforces", "https://example.com/solution")
            .await;

        assert!(matches!(result, Err(SolutionLinkError::Validation(_))));
    }

    #[tokio::test]
    async fn unreachable_api_is_distinguished_from_validation() {
        let client = ContestApiClient::new(UNREACHABLE).unwrap();
        let result = client
            .add_solution_link("cf-1111", "codeforces", "https://youtu.be/example1")
            .await;

        assert!(matches!(result, Err(SolutionLinkError::Unreachable(_))));
    }

    #[tokio::test]
    async fn rejection_carries_status_and_message() {
        let client = ContestApiClient::new(&serve(broken_api()).await).unwrap();
        let result = client
            .add_solution_link("cf-1920", "codeforces", "https://youtu.be/example1")
            .await;

        match result {
            Err(SolutionLinkError::Rejected { status, message }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "contest cf-1920 not found");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn accepted_submission() {
        let app = Router::new().route(
            "/api/contests/solution",
            routing::post(|| async { Json(json!({"success": true})) }),
        );
        let client = ContestApiClient::new(&serve(app).await).unwrap();

        client
            .add_solution_link("cc-start41", "codechef", "https://youtu.be/example1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn error_status_falls_back_to_local_data() {
        let client = ContestApiClient::new(&serve(broken_api()).await).unwrap();

        match client.fetch_contests().await {
            Err(FetchError::ErrorStatus { status, message }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "Failed to fetch contests");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let now = Utc::now();
        let feed = client.fetch_contests_or_fallback(now).await;
        assert!(feed.is_fallback());
        assert_eq!(feed.contests, fallback_contests(now));
    }

    #[tokio::test]
    async fn unreachable_api_falls_back_to_local_data() {
        let client = ContestApiClient::new(UNREACHABLE).unwrap();

        let feed = client.fetch_contests_or_fallback(Utc::now()).await;
        assert!(feed.is_fallback());
    }

    #[tokio::test]
    async fn live_contests_are_used_when_available() {
        let app = Router::new().route(
            "/api/contests",
            routing::get(|| async {
                Json(json!([{
                    "id": "cc-start41",
                    "name": "CodeChef Starters 41",
                    "url": "https://www.codechef.com/START41",
                    "platform": "CodeChef",
                    "startTime": "2024-01-09T00:00:00Z",
                    "endTime": "2024-01-09T03:00:00Z",
                    "duration": 3.0
                }]))
            }),
        );
        let client = ContestApiClient::new(&serve(app).await).unwrap();

        let feed = client.fetch_contests_or_fallback(Utc::now()).await;
        assert!(!feed.is_fallback());
        assert_eq!(feed.contests.len(), 1);
        assert_eq!(feed.contests[0].platform, crate::model::Platform::CodeChef);
    }
}
