use std::collections::HashMap;

use async_trait::async_trait;
use rand::Rng;

use crate::{
    Res, info, success,
    types::{Album, Artist, Track, TrackArtist},
    warning,
};

/// Catalog and library access the sampler draws from.
///
/// The production implementation goes through the web API; tests substitute
/// an in-memory catalog.
#[async_trait]
pub trait TrackSource {
    /// Albums and singles the artist is credited on.
    async fn albums_for_artist(&mut self, artist_id: &str) -> Res<Vec<Album>>;

    /// Tracks of one album.
    async fn album_tracks(&mut self, album_id: &str) -> Res<Vec<Track>>;

    /// Whether the track is already in the user's library.
    async fn is_saved(&mut self, track: &Track) -> Res<bool>;
}

/// Limits for one sampling run.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Number of tracks to aim for.
    pub target_count: usize,
    /// Ceiling on the combined duration of the picked tracks.
    pub max_runtime_ms: u64,
    /// Most picked tracks any single credited artist may reach.
    pub max_per_artist: u32,
    /// Total draws before the run gives up.
    pub max_attempts: u32,
    /// Consecutive over-runtime rejections after which the run stops early,
    /// or `None` to keep drawing until the attempt budget runs out.
    pub runtime_rejection_limit: Option<u32>,
}

/// Why a sampling run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    AttemptsExhausted,
    RuntimeRejections,
}

/// Result of one sampling run.
#[derive(Debug)]
pub struct SampleOutcome {
    pub picked: Vec<Track>,
    pub attempts: u32,
    pub total_ms: u64,
    /// Picked tracks per credited artist, keyed by artist ID where one
    /// exists and by name otherwise.
    pub artist_counts: HashMap<String, u32>,
    pub stop: StopReason,
}

/// Draws random tracks from the artists' catalogs under the configured
/// limits.
///
/// Each attempt picks one artist uniformly at random (with replacement), one
/// of their albums, and one track on it. The draw is rejected when the track
/// is already saved, when any of its credited artists is at the per-artist
/// limit, or when its duration would push the mix past the runtime ceiling.
/// Only the last kind feeds the consecutive-rejection counter; an accepted
/// track resets it, and the other two rejection kinds leave it untouched.
///
/// Album and track listings are fetched once per artist and album and reused
/// across attempts. An artist with no resolvable albums or tracks costs an
/// attempt but does not touch any counter.
pub async fn sample<S, R>(
    source: &mut S,
    pool: &[Artist],
    config: &SamplerConfig,
    rng: &mut R,
) -> SampleOutcome
where
    S: TrackSource,
    R: Rng,
{
    let mut album_cache: HashMap<String, Vec<Album>> = HashMap::new();
    let mut track_cache: HashMap<String, Vec<Track>> = HashMap::new();

    let mut picked: Vec<Track> = Vec::new();
    let mut artist_counts: HashMap<String, u32> = HashMap::new();
    let mut total_ms: u64 = 0;
    let mut attempts: u32 = 0;
    let mut runtime_rejections: u32 = 0;

    let stop = loop {
        if picked.len() >= config.target_count {
            break StopReason::TargetReached;
        }
        if pool.is_empty() || attempts >= config.max_attempts {
            break StopReason::AttemptsExhausted;
        }
        attempts += 1;

        let artist = &pool[rng.random_range(0..pool.len())];

        let album_id = {
            let albums = cached_albums(&mut album_cache, source, artist).await;
            if albums.is_empty() {
                info!("No tracks found for {}", artist.name);
                continue;
            }
            albums[rng.random_range(0..albums.len())].id.clone()
        };

        let track = {
            let tracks = cached_tracks(&mut track_cache, source, &album_id).await;
            if tracks.is_empty() {
                info!("No tracks found for {}", artist.name);
                continue;
            }
            tracks[rng.random_range(0..tracks.len())].clone()
        };

        let saved = match source.is_saved(&track).await {
            Ok(saved) => saved,
            Err(e) => {
                warning!("Failed to check whether '{}' is saved: {}", track.name, e);
                continue;
            }
        };
        if saved {
            info!("'{}' by {} is already saved", track.name, artist.name);
            continue;
        }

        let keys: Vec<String> = track.artists.iter().map(artist_key).collect();
        if keys
            .iter()
            .any(|key| artist_counts.get(key).copied().unwrap_or(0) >= config.max_per_artist)
        {
            info!(
                "'{}' by {} is at the per-artist limit",
                track.name, artist.name
            );
            continue;
        }

        if total_ms + track.duration_ms > config.max_runtime_ms {
            info!(
                "'{}' by {} would make the mix too long",
                track.name, artist.name
            );
            runtime_rejections += 1;
            if let Some(limit) = config.runtime_rejection_limit {
                if runtime_rejections >= limit {
                    break StopReason::RuntimeRejections;
                }
            }
            continue;
        }

        success!("'{}' by {} made it onto the mix", track.name, artist.name);
        total_ms += track.duration_ms;
        for key in keys {
            *artist_counts.entry(key).or_insert(0) += 1;
        }
        runtime_rejections = 0;
        picked.push(track);
    };

    SampleOutcome {
        picked,
        attempts,
        total_ms,
        artist_counts,
        stop,
    }
}

fn artist_key(artist: &TrackArtist) -> String {
    artist.id.clone().unwrap_or_else(|| artist.name.clone())
}

// A fetch failure is cached as an empty list so the artist is not retried on
// every subsequent draw.
async fn cached_albums<'a, S: TrackSource>(
    cache: &'a mut HashMap<String, Vec<Album>>,
    source: &mut S,
    artist: &Artist,
) -> &'a [Album] {
    if !cache.contains_key(&artist.id) {
        let albums = match source.albums_for_artist(&artist.id).await {
            Ok(albums) => albums,
            Err(e) => {
                warning!("Failed to fetch albums for {}: {}", artist.name, e);
                Vec::new()
            }
        };
        cache.insert(artist.id.clone(), albums);
    }
    &cache[&artist.id]
}

async fn cached_tracks<'a, S: TrackSource>(
    cache: &'a mut HashMap<String, Vec<Track>>,
    source: &mut S,
    album_id: &str,
) -> &'a [Track] {
    if !cache.contains_key(album_id) {
        let tracks = match source.album_tracks(album_id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warning!("Failed to fetch tracks for album {}: {}", album_id, e);
                Vec::new()
            }
        };
        cache.insert(album_id.to_string(), tracks);
    }
    &cache[album_id]
}
