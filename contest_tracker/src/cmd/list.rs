use crate::cmd::{bookmark_storage_path, contest_api_url, Tab};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::Args;
use contest_tracker_libs::{
    bookmark::FileStorage, classify, client::ContestApiClient, BookmarkStore, Contest, Platform,
    PlatformFilter,
};
use itertools::Itertools;

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = Tab::All)]
    tab: Tab,
    /// Platform to toggle in the filter; all platforms start selected.
    #[arg(long = "toggle-platform")]
    toggle_platforms: Vec<Platform>,
    #[arg(long)]
    api_url: Option<String>,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let api_url = args.api_url.unwrap_or_else(contest_api_url);
    let client = ContestApiClient::new(&api_url).with_context(|| {
        let message = format!("couldn't create API client for {}", api_url);
        tracing::error!(message);
        message
    })?;

    let mut filter = PlatformFilter::default();
    for platform in args.toggle_platforms {
        if !filter.toggle(platform) {
            tracing::warn!("{} is the last selected platform and stays selected", platform);
        }
    }

    let bookmarks = BookmarkStore::load(FileStorage::new(bookmark_storage_path()));

    let now = Utc::now();
    let feed = client.fetch_contests_or_fallback(now).await;
    if feed.is_fallback() {
        println!("(contest API unavailable, showing sample data)");
    }

    let classified = classify(&feed.contests, now, &filter, bookmarks.ids());
    println!(
        "Platforms: {}",
        filter.selected().iter().map(|p| p.name()).join(", ")
    );

    let tabs = [
        (Tab::Upcoming, &classified.upcoming),
        (Tab::Past, &classified.past),
        (Tab::Bookmarked, &classified.bookmarked),
    ];
    for (tab, contests) in tabs {
        if args.tab == Tab::All || args.tab == tab {
            print_contests(tab, contests, &bookmarks);
        }
    }

    Ok(())
}

fn print_contests(tab: Tab, contests: &[Contest], bookmarks: &BookmarkStore<FileStorage>) {
    println!();
    println!("{} ({})", tab, contests.len());
    for contest in contests {
        let mark = if bookmarks.is_bookmarked(&contest.id) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<14} {:<10} {} {:>4}h  {}",
            mark,
            contest.id,
            contest.platform,
            format_time(contest.start_time),
            contest.duration,
            contest.name
        );
        match (&contest.solution_link, tab) {
            (Some(link), Tab::Past | Tab::Bookmarked) => println!("  solution: {}", link),
            _ => println!("  {}", contest.url),
        }
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
