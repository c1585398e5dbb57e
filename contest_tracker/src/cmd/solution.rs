use crate::cmd::contest_api_url;
use anyhow::{Context, Result};
use clap::Args;
use contest_tracker_libs::client::{ContestApiClient, SolutionLinkError};

#[derive(Debug, Args)]
pub struct SolutionArgs {
    #[arg(long)]
    contest_id: String,
    #[arg(long)]
    platform: String,
    #[arg(long)]
    youtube_link: String,
    #[arg(long)]
    api_url: Option<String>,
}

pub async fn run(args: SolutionArgs) -> Result<()> {
    let api_url = args.api_url.unwrap_or_else(contest_api_url);
    let client = ContestApiClient::new(&api_url).with_context(|| {
        let message = format!("couldn't create API client for {}", api_url);
        tracing::error!(message);
        message
    })?;

    match client
        .add_solution_link(&args.contest_id, &args.platform, &args.youtube_link)
        .await
    {
        Ok(()) => {
            println!("Solution link added successfully");
            Ok(())
        }
        Err(SolutionLinkError::Validation(e)) => {
            tracing::error!("Validation error: {}", e);
            anyhow::bail!("Please fill in all fields with a valid YouTube link")
        }
        Err(e) => {
            tracing::error!("Failed to add solution link: {:?}", e);
            anyhow::bail!("Failed to add solution link: {}", e)
        }
    }
}
