use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use spinctl::curation::{recency, reconcile};
use spinctl::types::{SavedTrackItem, Track};

// Helper function to build a list of owned track IDs
fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|id| id.to_string()).collect()
}

// Helper function to create a bare test track
fn track(id: &str) -> Track {
    Track {
        id: Some(id.to_string()),
        name: format!("Track {}", id),
        uri: format!("spotify:track:{}", id),
        duration_ms: 200_000,
        artists: Vec::new(),
        album: None,
        popularity: None,
        external_urls: None,
    }
}

// Helper function to create a saved item liked at a given instant
fn saved_item(id: &str, added_at: DateTime<Utc>) -> SavedTrackItem {
    SavedTrackItem {
        added_at,
        track: Some(track(id)),
    }
}

#[test]
fn test_diff_disjoint_sets() {
    let current = ids(&["a", "b", "c"]);
    let desired = ids(&["b", "c", "d"]);

    let delta = reconcile::diff(&current, &desired);

    // Only the new track is added and only the stale one removed
    assert_eq!(delta.to_add, ids(&["d"]));
    assert_eq!(delta.to_remove, ids(&["a"]));
}

#[test]
fn test_diff_applying_delta_reaches_desired() {
    let current = ids(&["a", "b", "c", "d"]);
    let desired = ids(&["c", "d", "e", "f"]);

    let delta = reconcile::diff(&current, &desired);

    // No track is both added and removed
    assert!(delta.to_add.iter().all(|id| !delta.to_remove.contains(id)));

    // Start from current, drop the removals, append the additions
    let mut result: Vec<String> = current
        .iter()
        .filter(|id| !delta.to_remove.contains(id))
        .cloned()
        .collect();
    result.extend(delta.to_add.iter().cloned());

    // The materialized set must equal the desired set exactly
    let result_set: HashSet<&String> = result.iter().collect();
    let desired_set: HashSet<&String> = desired.iter().collect();
    assert_eq!(result_set, desired_set);
}

#[test]
fn test_diff_idempotence() {
    let current = ids(&["a", "b"]);
    let desired = ids(&["a", "b"]);

    let delta = reconcile::diff(&current, &desired);

    // Reconciling an already converged playlist is a no-op
    assert!(delta.is_noop());
    assert!(delta.to_add.is_empty());
    assert!(delta.to_remove.is_empty());
}

#[test]
fn test_diff_empty_current_adds_everything() {
    let delta = reconcile::diff(&[], &ids(&["a", "b", "c"]));

    // The create-new-playlist path degenerates to add-all
    assert_eq!(delta.to_add, ids(&["a", "b", "c"]));
    assert!(delta.to_remove.is_empty());
}

#[test]
fn test_diff_empty_desired_removes_everything() {
    let delta = reconcile::diff(&ids(&["a", "b"]), &[]);

    assert!(delta.to_add.is_empty());
    assert_eq!(delta.to_remove, ids(&["a", "b"]));
}

#[test]
fn test_diff_collapses_duplicates() {
    let current = ids(&["a", "a", "b"]);
    let desired = ids(&["b", "c", "c", "b"]);

    let delta = reconcile::diff(&current, &desired);

    // Duplicate IDs produce a single add/remove entry each
    assert_eq!(delta.to_add, ids(&["c"]));
    assert_eq!(delta.to_remove, ids(&["a"]));
}

#[test]
fn test_diff_keeps_first_occurrence_order() {
    let current = ids(&["x", "y", "z"]);
    let desired = ids(&["q", "p", "x"]);

    let delta = reconcile::diff(&current, &desired);

    // Order follows the source list, not any sorted order
    assert_eq!(delta.to_add, ids(&["q", "p"]));
    assert_eq!(delta.to_remove, ids(&["y", "z"]));
}

#[test]
fn test_filter_by_window_inclusive_cutoff() {
    let cutoff = Utc::now() - Duration::days(30);

    let items = vec![
        saved_item("before", cutoff - Duration::seconds(1)),
        saved_item("exactly", cutoff),
        saved_item("after", cutoff + Duration::seconds(1)),
    ];

    let recent = recency::filter_by_window(items, cutoff);

    // The track liked exactly at the cutoff instant stays in
    assert_eq!(recency::track_ids(&recent), ids(&["after", "exactly"]));
}

#[test]
fn test_filter_by_window_sorts_newest_first() {
    let cutoff = Utc::now() - Duration::days(7);

    let items = vec![
        saved_item("old", cutoff + Duration::days(1)),
        saved_item("newest", cutoff + Duration::days(5)),
        saved_item("middle", cutoff + Duration::days(3)),
    ];

    let recent = recency::filter_by_window(items, cutoff);

    assert_eq!(
        recency::track_ids(&recent),
        ids(&["newest", "middle", "old"])
    );
}

#[test]
fn test_filter_by_window_drops_missing_tracks() {
    let cutoff = Utc::now() - Duration::days(7);

    let items = vec![
        SavedTrackItem {
            added_at: cutoff + Duration::days(1),
            track: None,
        },
        saved_item("kept", cutoff + Duration::days(2)),
    ];

    let recent = recency::filter_by_window(items, cutoff);

    // The entry without a track object is gone
    assert_eq!(recent.len(), 1);
    assert_eq!(recency::track_ids(&recent), ids(&["kept"]));
}

#[test]
fn test_track_ids_unique_and_ordered() {
    let now = Utc::now();

    let items = vec![
        saved_item("a", now),
        saved_item("b", now),
        saved_item("a", now),
    ];

    // Repeated IDs collapse to the first occurrence
    assert_eq!(recency::track_ids(&items), ids(&["a", "b"]));
}
