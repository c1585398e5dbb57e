use crate::modules::models::{
    request::ValidatedJson,
    response::{api_error, solution_error, ApiError},
};
use axum::{extract::Extension, http::StatusCode, Json};
use chrono::Utc;
use contest_tracker_libs::{
    api::SuccessResponse,
    solution::SolutionLinkRequest,
    youtube::{candidate_videos, YoutubeVideo},
    Contest, ContestService,
};
use std::sync::Arc;
use tokio::time::Instant;

pub async fn get_contests(
    Extension(service): Extension<Arc<ContestService>>,
) -> Result<Json<Vec<Contest>>, ApiError> {
    let start_process = Instant::now();

    let contests = service.contests(Utc::now()).await.map_err(|e| {
        tracing::error!("Error fetching contests: {:?}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch contests",
        )
    })?;

    tracing::info!(
        target: "querylog",
        "elapsed_time={} contests={}",
        Instant::now().duration_since(start_process).as_millis(),
        contests.len()
    );

    Ok(Json(contests))
}

pub async fn attach_solution(
    Extension(service): Extension<Arc<ContestService>>,
    ValidatedJson(request): ValidatedJson<SolutionLinkRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    service
        .attach_solution_link(&request, Utc::now())
        .await
        .map_err(|e| {
            tracing::error!("Error adding solution link: {:?}", e);
            solution_error(&e)
        })?;

    Ok(Json(SuccessResponse::default()))
}

pub async fn get_youtube_videos() -> Json<Vec<YoutubeVideo>> {
    Json(candidate_videos())
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
