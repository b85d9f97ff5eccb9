use std::collections::HashSet;

/// Maximum number of tracks the playlist endpoints accept per request.
pub const PLAYLIST_BATCH_SIZE: usize = 100;

/// The additions and removals that turn one playlist state into another.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PlaylistDelta {
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl PlaylistDelta {
    /// True when the playlist already matches the desired state.
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Computes the delta that reconciles `current` toward `desired`.
///
/// Membership is decided by track ID, not by position: tracks present in
/// both lists are left alone, so applying the delta of an already reconciled
/// playlist is a no-op. Duplicate IDs in either input collapse to one entry,
/// and the returned lists keep the first-occurrence order of their source
/// list.
pub fn diff(current: &[String], desired: &[String]) -> PlaylistDelta {
    let current_set: HashSet<&String> = current.iter().collect();
    let desired_set: HashSet<&String> = desired.iter().collect();

    let mut seen: HashSet<&String> = HashSet::new();
    let to_add = desired
        .iter()
        .filter(|id| !current_set.contains(*id) && seen.insert(*id))
        .cloned()
        .collect();

    let mut seen: HashSet<&String> = HashSet::new();
    let to_remove = current
        .iter()
        .filter(|id| !desired_set.contains(*id) && seen.insert(*id))
        .cloned()
        .collect();

    PlaylistDelta { to_add, to_remove }
}
