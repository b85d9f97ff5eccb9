use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::types::SavedTrackItem;

/// Keeps the saved tracks liked at or after `cutoff`, newest first.
///
/// The cutoff comparison is inclusive: a track liked exactly at the cutoff
/// instant stays in. Items whose track object is missing (removed or local
/// tracks) are dropped.
pub fn filter_by_window(
    items: Vec<SavedTrackItem>,
    cutoff: DateTime<Utc>,
) -> Vec<SavedTrackItem> {
    let mut recent: Vec<SavedTrackItem> = items
        .into_iter()
        .filter(|item| item.track.is_some() && item.added_at >= cutoff)
        .collect();

    recent.sort_by(|a, b| b.added_at.cmp(&a.added_at));
    recent
}

/// Collects the unique track IDs of saved items, keeping their order.
pub fn track_ids(items: &[SavedTrackItem]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .iter()
        .filter_map(|item| item.track.as_ref().and_then(|track| track.id.clone()))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
