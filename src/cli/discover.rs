use std::collections::{HashMap, HashSet};

use chrono::{Duration, Utc};

use crate::{
    curation::{discovery, recency},
    error, info,
    management::TokenManager,
    spotify, success, warning,
};

const DEFAULT_MAX_PER_ARTIST: u32 = 2;

pub async fn discover(months: u32) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run spinctl auth\n Error: {}",
                e
            );
        }
    };

    let saved = match spotify::library::get_saved_tracks(&mut token_mgr).await {
        Ok(items) => items,
        Err(e) => {
            error!("Failed to fetch saved tracks: {}", e);
        }
    };

    let cutoff = Utc::now() - Duration::days(i64::from(months) * 30);
    let recent = recency::filter_by_window(saved, cutoff);

    if recent.len() < 10 {
        warning!(
            "Only found {} tracks in last {} months, may generate generic playlist",
            recent.len(),
            months
        );
    }
    info!(
        "Fetched {} recent tracks from last {} months",
        recent.len(),
        months
    );

    let saved_ids: HashSet<String> = recency::track_ids(&recent).into_iter().collect();
    let tracks: Vec<_> = recent.into_iter().filter_map(|item| item.track).collect();

    let mut state = discovery::DiscoveryState::new();
    state.top_genres = discovery::analyze_genres(&tracks);
    state.artists = discovery::analyze_artists(&tracks);

    info!("Ranked {} genres from recent likes", state.top_genres.len());
    info!("Profiled {} artists from recent likes", state.artists.len());

    let artist_counts: HashMap<String, u32> = HashMap::new();
    match discovery::discover_track(&mut state, &saved_ids, &artist_counts, DEFAULT_MAX_PER_ARTIST)
        .await
    {
        Ok(Some(track)) => success!("Discovered '{}'", track.name),
        Ok(None) => info!("No track discovered; the seeding strategies are not implemented yet"),
        Err(e) => {
            error!("Discovery failed: {}", e);
        }
    }
}
