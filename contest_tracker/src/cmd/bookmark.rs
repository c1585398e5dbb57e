use crate::cmd::bookmark_storage_path;
use anyhow::{Context, Result};
use clap::Args;
use contest_tracker_libs::{bookmark::FileStorage, BookmarkStore};

#[derive(Debug, Args)]
pub struct BookmarkArgs {
    contest_id: String,
}

pub async fn run(args: BookmarkArgs) -> Result<()> {
    let path = bookmark_storage_path();
    let mut store = BookmarkStore::load(FileStorage::new(&path));

    let bookmarked = store.toggle(&args.contest_id).with_context(|| {
        let message = format!("failed to save bookmarks to {}", path);
        tracing::error!(message);
        message
    })?;

    if bookmarked {
        println!("Bookmarked {}", args.contest_id);
    } else {
        println!("Removed bookmark {}", args.contest_id);
    }
    println!("{} contests bookmarked", store.ids().len());

    Ok(())
}
