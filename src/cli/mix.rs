use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tabled::Table;

use crate::{
    Res,
    curation::{
        reconcile,
        sampler::{self, SamplerConfig, StopReason, TrackSource},
    },
    error, info,
    management::TokenManager,
    spotify, success,
    types::{Album, ArtistDistributionRow, Track},
    utils::{self, SavedMatchMode},
    warning,
};

/// Production track source backed by the web API.
///
/// Saved-track checks run in one of two modes: by track ID with memoized
/// point lookups, or by a normalized name plus primary artist key against
/// the whole library, for catalogs that relist the same recording under a
/// new ID.
struct SpotifyTrackSource<'a> {
    token_mgr: &'a mut TokenManager,
    mode: SavedMatchMode,
    saved_by_id: HashMap<String, bool>,
    saved_keys: HashSet<String>,
}

impl<'a> SpotifyTrackSource<'a> {
    async fn new(token_mgr: &'a mut TokenManager, mode: SavedMatchMode) -> Res<Self> {
        let mut saved_keys: HashSet<String> = HashSet::new();

        // Name matching needs the whole library up front; ID matching gets
        // by with per-track containment lookups.
        if mode == SavedMatchMode::NameArtist {
            let items = spotify::library::get_saved_tracks(token_mgr).await?;
            for item in items {
                if let Some(key) = item.track.as_ref().and_then(track_match_key) {
                    saved_keys.insert(key);
                }
            }
        }

        Ok(SpotifyTrackSource {
            token_mgr,
            mode,
            saved_by_id: HashMap::new(),
            saved_keys,
        })
    }
}

#[async_trait]
impl TrackSource for SpotifyTrackSource<'_> {
    async fn albums_for_artist(&mut self, artist_id: &str) -> Res<Vec<Album>> {
        Ok(spotify::albums::get_artist_albums(self.token_mgr, artist_id).await?)
    }

    async fn album_tracks(&mut self, album_id: &str) -> Res<Vec<Track>> {
        Ok(spotify::albums::get_album_tracks(self.token_mgr, album_id).await?)
    }

    async fn is_saved(&mut self, track: &Track) -> Res<bool> {
        match self.mode {
            SavedMatchMode::Id => {
                let Some(id) = track.id.clone() else {
                    return Ok(false);
                };
                if let Some(&saved) = self.saved_by_id.get(&id) {
                    return Ok(saved);
                }

                let flags =
                    spotify::library::saved_tracks_contain(self.token_mgr, &[id.clone()]).await?;
                let saved = flags.first().copied().unwrap_or(false);
                self.saved_by_id.insert(id, saved);
                Ok(saved)
            }
            SavedMatchMode::NameArtist => Ok(track_match_key(track)
                .map(|key| self.saved_keys.contains(&key))
                .unwrap_or(false)),
        }
    }
}

fn track_match_key(track: &Track) -> Option<String> {
    let primary = track.artists.first()?;
    Some(utils::normalize_match_key(&track.name, &primary.name))
}

pub async fn mix(
    tracks: usize,
    minutes: u64,
    per_artist: u32,
    attempts: u32,
    max_runtime_rejects: u32,
    keep_trying: bool,
    match_mode: SavedMatchMode,
) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run spinctl auth\n Error: {}",
                e
            );
        }
    };

    let pool = match spotify::artists::get_followed_artists(&mut token_mgr).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to fetch followed artists: {}", e);
        }
    };

    if pool.is_empty() {
        error!("No followed artists to sample from");
    }

    info!("Sampling from {} followed artists", pool.len());
    info!(
        "Creating weekly mix with max {} tracks, {} minutes runtime, max {} tracks per artist",
        tracks, minutes, per_artist
    );

    let config = SamplerConfig {
        target_count: tracks,
        max_runtime_ms: minutes * 60 * 1000,
        max_per_artist: per_artist,
        max_attempts: attempts,
        runtime_rejection_limit: if keep_trying {
            None
        } else {
            Some(max_runtime_rejects)
        },
    };

    let outcome = {
        let mut source = match SpotifyTrackSource::new(&mut token_mgr, match_mode).await {
            Ok(source) => source,
            Err(e) => {
                error!("Failed to index saved tracks: {}", e);
            }
        };

        let mut rng = rand::rng();
        sampler::sample(&mut source, &pool, &config, &mut rng).await
    };

    info!("Mix assembled with {} tracks", outcome.picked.len());
    info!(
        "Total runtime: {:.1} minutes",
        outcome.total_ms as f64 / 60_000.0
    );
    info!("Attempts made: {}", outcome.attempts);

    match outcome.stop {
        StopReason::TargetReached => {}
        StopReason::AttemptsExhausted => {
            warning!("Attempt budget exhausted before reaching {} tracks", tracks);
        }
        StopReason::RuntimeRejections => {
            info!("Stopped near the runtime ceiling after repeated over-length draws");
        }
    }

    if outcome.picked.is_empty() {
        warning!("No tracks were added to the playlist.");
        return;
    }

    let week = Utc::now().iso_week().week();
    let playlist_name = format!("Weekly Mix {}", week);

    info!("Creating playlist: {}", playlist_name);
    let created = match spotify::playlists::create(
        &mut token_mgr,
        &playlist_name,
        "Your Weekly Mix from Saved Artists!",
    )
    .await
    {
        Ok(created) => created,
        Err(e) => {
            error!("Failed to create playlist: {}", e);
        }
    };

    let track_ids: Vec<String> = outcome
        .picked
        .iter()
        .filter_map(|track| track.id.clone())
        .collect();

    for batch in track_ids.chunks(reconcile::PLAYLIST_BATCH_SIZE) {
        if let Err(e) = spotify::playlists::add_tracks(&mut token_mgr, &created.id, batch).await {
            error!("Failed to add tracks to playlist: {}", e);
        }
    }

    success!("Playlist '{}' created successfully!", playlist_name);
    info!(
        "Playlist URL: https://open.spotify.com/playlist/{}",
        created.id
    );

    let mut distribution: HashMap<String, u32> = HashMap::new();
    for track in &outcome.picked {
        for artist in &track.artists {
            *distribution.entry(artist.name.clone()).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<ArtistDistributionRow> = distribution
        .into_iter()
        .map(|(artist, tracks)| ArtistDistributionRow { artist, tracks })
        .collect();
    rows.sort_by(|a, b| b.tracks.cmp(&a.tracks).then_with(|| a.artist.cmp(&b.artist)));

    let table = Table::new(rows);
    println!("{}", table);
}
