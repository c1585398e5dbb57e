use crate::cmd::contest_api_url;
use anyhow::{Context, Result};
use clap::Args;
use contest_tracker_libs::client::ContestApiClient;

#[derive(Debug, Args)]
pub struct LinkVideosArgs {
    /// Only print the links which would be attached.
    #[arg(long)]
    dry_run: bool,
    #[arg(long)]
    api_url: Option<String>,
}

/// YouTubeの解答動画候補をまとめてコンテストに紐付ける
pub async fn run(args: LinkVideosArgs) -> Result<()> {
    let api_url = args.api_url.unwrap_or_else(contest_api_url);
    let client = ContestApiClient::new(&api_url).with_context(|| {
        let message = format!("couldn't create API client for {}", api_url);
        tracing::error!(message);
        message
    })?;

    let videos = client.fetch_youtube_videos().await.with_context(|| {
        let message = "Failed to fetch YouTube videos";
        tracing::error!(message);
        message
    })?;
    tracing::info!("{} candidate videos retrieved", videos.len());

    let mut failures = 0usize;
    for video in videos.iter() {
        let link = video.watch_url();
        if args.dry_run {
            println!("{} -> {}", video.contest_id, link);
            continue;
        }

        match client
            .add_solution_link(&video.contest_id, video.platform.id(), &link)
            .await
        {
            Ok(()) => println!("Linked {} to {}", video.title, video.contest_id),
            Err(e) => {
                failures += 1;
                tracing::warn!("couldn't link {}: {}", video.contest_id, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} videos could not be linked", failures, videos.len());
    }

    Ok(())
}
