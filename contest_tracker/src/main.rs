mod cmd;
mod modules;

use crate::cmd::{
    bookmark::{self, BookmarkArgs},
    link::{self, LinkVideosArgs},
    list::{self, ListArgs},
    server::{self, ServerArgs},
    solution::{self, SolutionArgs},
};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::{env, str::FromStr};
use tokio::runtime::Builder;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{self, time::OffsetTime},
};

#[derive(Debug, Parser)]
#[command(name = "contest_tracker")]
#[command(about = "Programming contest tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the contest API.
    Server(ServerArgs),
    /// Show upcoming, past and bookmarked contests.
    List(ListArgs),
    /// Toggle a bookmark.
    Bookmark(BookmarkArgs),
    /// Attach a solution video to a contest.
    Solution(SolutionArgs),
    /// Attach every candidate YouTube video to its contest.
    LinkVideos(LinkVideosArgs),
}

fn main() {
    dotenv().ok();

    let log_level = env::var("RUST_LOG").unwrap_or(String::from("info"));
    let filter = EnvFilter::builder()
        .with_default_directive(
            LevelFilter::from_str(&log_level)
                .expect("couldn't parse specified log level")
                .into(),
        )
        .from_env_lossy();
    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_timer(OffsetTime::local_rfc_3339().expect("couldn't determine local time offset"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(format)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime");

    match Cli::parse().command {
        Commands::Server(args) => runtime.block_on(server::run(args)),
        Commands::List(args) => runtime.block_on(list::run(args)),
        Commands::Bookmark(args) => runtime.block_on(bookmark::run(args)),
        Commands::Solution(args) => runtime.block_on(solution::run(args)),
        Commands::LinkVideos(args) => runtime.block_on(link::run(args)),
    }
    .expect("command failed");
}
