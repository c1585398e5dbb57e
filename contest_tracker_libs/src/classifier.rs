use crate::{filter::PlatformFilter, model::Contest};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// The three views rendered by the tracker.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassifiedContests {
    /// Selected platforms, start time after `now`, earliest first.
    pub upcoming: Vec<Contest>,
    /// Selected platforms, start time at or before `now`, latest first.
    pub past: Vec<Contest>,
    /// Every bookmarked contest regardless of the platform filter, earliest first.
    pub bookmarked: Vec<Contest>,
}

/// Partitions and sorts contests relative to `now`.
///
/// Sorting is stable, so contests sharing a start time keep their aggregation order.
pub fn classify(
    contests: &[Contest],
    now: DateTime<Utc>,
    filter: &PlatformFilter,
    bookmark_ids: &[String],
) -> ClassifiedContests {
    let bookmark_ids: HashSet<&str> = bookmark_ids.iter().map(String::as_str).collect();

    let (mut upcoming, mut past): (Vec<Contest>, Vec<Contest>) = contests
        .iter()
        .filter(|contest| filter.is_selected(contest.platform))
        .cloned()
        .partition(|contest| contest.is_upcoming(now));
    upcoming.sort_by_key(|contest| contest.start_time);
    past.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    let mut bookmarked: Vec<Contest> = contests
        .iter()
        .filter(|contest| bookmark_ids.contains(contest.id.as_str()))
        .cloned()
        .collect();
    bookmarked.sort_by_key(|contest| contest.start_time);

    ClassifiedContests {
        upcoming,
        past,
        bookmarked,
    }
}
