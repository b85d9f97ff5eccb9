//! Extension point for generative playlist discovery.
//!
//! The state plumbing and the seam the discover command drives are in place,
//! but the seeding strategies themselves are placeholders and never produce
//! a track.

use std::collections::{HashMap, HashSet};

use crate::{Res, types::Track};

/// Seed strategy a discovery attempt starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStrategy {
    Genre,
    Artist,
}

/// Working state for one discovery run.
#[derive(Debug)]
pub struct DiscoveryState {
    /// Genres ranked by how strongly they show up in recent likes.
    pub top_genres: Vec<String>,
    /// How often each artist shows up in recent likes.
    pub artists: HashMap<String, u32>,
    /// Candidate tracks collected per genre seed.
    pub genre_candidates: HashMap<String, Vec<Track>>,
    /// Candidate tracks collected per artist seed.
    pub artist_candidates: HashMap<String, Vec<Track>>,
    strategy_toggle: bool,
}

impl DiscoveryState {
    pub fn new() -> Self {
        DiscoveryState {
            top_genres: Vec::new(),
            artists: HashMap::new(),
            genre_candidates: HashMap::new(),
            artist_candidates: HashMap::new(),
            strategy_toggle: true,
        }
    }

    /// Strategy for the next attempt, alternating between genre and artist
    /// seeding.
    pub fn next_strategy(&mut self) -> SeedStrategy {
        let strategy = if self.strategy_toggle {
            SeedStrategy::Genre
        } else {
            SeedStrategy::Artist
        };
        self.strategy_toggle = !self.strategy_toggle;
        strategy
    }
}

impl Default for DiscoveryState {
    fn default() -> Self {
        DiscoveryState::new()
    }
}

/// Ranks the genres seen across recently liked tracks, strongest first.
///
/// Genre analysis is not implemented yet; the ranking is always empty.
pub fn analyze_genres(_tracks: &[Track]) -> Vec<String> {
    Vec::new()
}

/// Counts how often each artist shows up in recently liked tracks.
///
/// Artist analysis is not implemented yet; the map is always empty.
pub fn analyze_artists(_tracks: &[Track]) -> HashMap<String, u32> {
    HashMap::new()
}

/// Produces one discovered track under the given constraints, or `None`
/// when the active strategy has nothing to offer.
///
/// Both seeding strategies are placeholders for now, so every attempt
/// returns `None`.
pub async fn discover_track(
    state: &mut DiscoveryState,
    saved_track_ids: &HashSet<String>,
    artist_counts: &HashMap<String, u32>,
    max_per_artist: u32,
) -> Res<Option<Track>> {
    match state.next_strategy() {
        SeedStrategy::Genre => genre_based_discovery(state, saved_track_ids, max_per_artist).await,
        SeedStrategy::Artist => {
            artist_based_discovery(state, saved_track_ids, artist_counts, max_per_artist).await
        }
    }
}

// TODO: seed the recommendations endpoint with the top ranked genres.
async fn genre_based_discovery(
    _state: &DiscoveryState,
    _saved_track_ids: &HashSet<String>,
    _max_per_artist: u32,
) -> Res<Option<Track>> {
    Ok(None)
}

async fn artist_based_discovery(
    _state: &DiscoveryState,
    _saved_track_ids: &HashSet<String>,
    _artist_counts: &HashMap<String, u32>,
    _max_per_artist: u32,
) -> Res<Option<Track>> {
    Ok(None)
}
