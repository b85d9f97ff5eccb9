use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use rand::{SeedableRng, rngs::StdRng};
use spinctl::Res;
use spinctl::curation::sampler::{self, SamplerConfig, StopReason, TrackSource};
use spinctl::types::{Album, AlbumArtist, Artist, Track, TrackArtist};

// In-memory catalog standing in for the web API
struct FakeSource {
    albums: HashMap<String, Vec<Album>>,
    tracks: HashMap<String, Vec<Track>>,
    saved: HashSet<String>,
}

#[async_trait]
impl TrackSource for FakeSource {
    async fn albums_for_artist(&mut self, artist_id: &str) -> Res<Vec<Album>> {
        Ok(self.albums.get(artist_id).cloned().unwrap_or_default())
    }

    async fn album_tracks(&mut self, album_id: &str) -> Res<Vec<Track>> {
        Ok(self.tracks.get(album_id).cloned().unwrap_or_default())
    }

    async fn is_saved(&mut self, track: &Track) -> Res<bool> {
        Ok(track
            .id
            .as_ref()
            .map(|id| self.saved.contains(id))
            .unwrap_or(false))
    }
}

fn artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn album(id: &str, artist_id: &str, artist_name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: format!("Album {}", id),
        artists: vec![AlbumArtist {
            id: artist_id.to_string(),
            name: artist_name.to_string(),
        }],
    }
}

fn track(id: &str, artist_id: &str, artist_name: &str, duration_ms: u64) -> Track {
    Track {
        id: Some(id.to_string()),
        name: format!("Track {}", id),
        uri: format!("spotify:track:{}", id),
        duration_ms,
        artists: vec![TrackArtist {
            id: Some(artist_id.to_string()),
            name: artist_name.to_string(),
        }],
        album: None,
        popularity: None,
        external_urls: None,
    }
}

// Helper function to build a pool and a source where each artist has one
// album of equally long tracks
fn catalog(
    specs: &[(&str, &str)],
    tracks_per_album: usize,
    track_ms: u64,
) -> (Vec<Artist>, FakeSource) {
    let pool: Vec<Artist> = specs.iter().map(|(id, name)| artist(id, name)).collect();

    let mut albums: HashMap<String, Vec<Album>> = HashMap::new();
    let mut tracks: HashMap<String, Vec<Track>> = HashMap::new();
    for (artist_id, artist_name) in specs {
        let album_id = format!("{}_album", artist_id);
        albums.insert(
            artist_id.to_string(),
            vec![album(&album_id, artist_id, artist_name)],
        );

        let album_tracks: Vec<Track> = (0..tracks_per_album)
            .map(|n| {
                track(
                    &format!("{}_t{}", artist_id, n),
                    artist_id,
                    artist_name,
                    track_ms,
                )
            })
            .collect();
        tracks.insert(album_id, album_tracks);
    }

    let source = FakeSource {
        albums,
        tracks,
        saved: HashSet::new(),
    };
    (pool, source)
}

// Helper function to build a config with roomy defaults
fn base_config() -> SamplerConfig {
    SamplerConfig {
        target_count: 10,
        max_runtime_ms: 60 * 60_000,
        max_per_artist: 2,
        max_attempts: 200,
        runtime_rejection_limit: Some(10),
    }
}

#[tokio::test]
async fn test_sample_reaches_target() {
    let (pool, mut source) = catalog(
        &[
            ("a1", "Artist One"),
            ("a2", "Artist Two"),
            ("a3", "Artist Three"),
            ("a4", "Artist Four"),
            ("a5", "Artist Five"),
            ("a6", "Artist Six"),
            ("a7", "Artist Seven"),
            ("a8", "Artist Eight"),
        ],
        5,
        180_000,
    );
    let config = base_config();
    let mut rng = StdRng::seed_from_u64(7);

    let outcome = sampler::sample(&mut source, &pool, &config, &mut rng).await;

    // Target met without blowing any limit
    assert_eq!(outcome.picked.len(), 10);
    assert_eq!(outcome.stop, StopReason::TargetReached);
    assert!(outcome.total_ms <= config.max_runtime_ms);
    assert!(
        outcome
            .artist_counts
            .values()
            .all(|&count| count <= config.max_per_artist)
    );

    // Reported runtime matches the picked tracks
    let sum: u64 = outcome.picked.iter().map(|t| t.duration_ms).sum();
    assert_eq!(outcome.total_ms, sum);
}

#[tokio::test]
async fn test_sample_never_exceeds_per_artist_cap() {
    let (pool, mut source) = catalog(
        &[("a1", "Artist One"), ("a2", "Artist Two"), ("a3", "Artist Three")],
        10,
        180_000,
    );
    // Unreachable target forces the run through many rejections
    let config = SamplerConfig {
        target_count: 30,
        max_runtime_ms: 600 * 60_000,
        ..base_config()
    };

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = sampler::sample(&mut source, &pool, &config, &mut rng).await;

        // Three artists with a cap of two can never fill thirty slots
        assert_eq!(outcome.stop, StopReason::AttemptsExhausted);
        assert!(outcome.picked.len() <= 6);
        assert!(
            outcome
                .artist_counts
                .values()
                .all(|&count| count <= config.max_per_artist)
        );
    }
}

#[tokio::test]
async fn test_sample_excludes_saved_tracks() {
    // Every track in the catalog is already saved
    let (pool, mut source) = catalog(&[("a1", "Artist One")], 3, 180_000);
    source.saved = ["a1_t0", "a1_t1", "a1_t2"]
        .iter()
        .map(|id| id.to_string())
        .collect();

    let config = SamplerConfig {
        target_count: 5,
        max_attempts: 50,
        ..base_config()
    };
    let mut rng = StdRng::seed_from_u64(3);

    let outcome = sampler::sample(&mut source, &pool, &config, &mut rng).await;

    // Nothing eligible, so every attempt is burned on saved rejections
    assert!(outcome.picked.is_empty());
    assert_eq!(outcome.attempts, 50);
    assert_eq!(outcome.stop, StopReason::AttemptsExhausted);

    // Leave exactly one track unsaved and it becomes the only pick
    source.saved.remove("a1_t1");
    let config = SamplerConfig {
        target_count: 5,
        max_attempts: 50,
        max_per_artist: 1,
        ..base_config()
    };
    let mut rng = StdRng::seed_from_u64(3);

    let outcome = sampler::sample(&mut source, &pool, &config, &mut rng).await;

    assert_eq!(outcome.picked.len(), 1);
    assert_eq!(outcome.picked[0].id.as_deref(), Some("a1_t1"));
}

#[tokio::test]
async fn test_sample_stops_after_consecutive_runtime_rejections() {
    // One artist, one album, one 70 minute track against a 60 minute budget
    let (pool, mut source) = catalog(&[("a1", "Artist One")], 1, 70 * 60_000);
    let config = SamplerConfig {
        target_count: 16,
        max_runtime_ms: 60 * 60_000,
        ..base_config()
    };
    let mut rng = StdRng::seed_from_u64(42);

    let outcome = sampler::sample(&mut source, &pool, &config, &mut rng).await;

    // Terminates through the rejection counter, not attempt exhaustion
    assert!(outcome.picked.is_empty());
    assert_eq!(outcome.stop, StopReason::RuntimeRejections);
    assert_eq!(outcome.attempts, 10);
    assert!(outcome.attempts < config.max_attempts);
}

#[tokio::test]
async fn test_sample_keep_trying_runs_out_the_attempt_budget() {
    let (pool, mut source) = catalog(&[("a1", "Artist One")], 1, 70 * 60_000);
    let config = SamplerConfig {
        target_count: 16,
        max_runtime_ms: 60 * 60_000,
        runtime_rejection_limit: None,
        ..base_config()
    };
    let mut rng = StdRng::seed_from_u64(42);

    let outcome = sampler::sample(&mut source, &pool, &config, &mut rng).await;

    // Without a rejection limit the run only stops at the attempt ceiling
    assert!(outcome.picked.is_empty());
    assert_eq!(outcome.stop, StopReason::AttemptsExhausted);
    assert_eq!(outcome.attempts, config.max_attempts);
}

#[tokio::test]
async fn test_sample_runtime_budget_never_exceeded() {
    // Twenty minute tracks against a sixty minute budget
    let (pool, mut source) = catalog(
        &[("a1", "Artist One"), ("a2", "Artist Two")],
        6,
        20 * 60_000,
    );
    let config = SamplerConfig {
        max_runtime_ms: 60 * 60_000,
        max_per_artist: 10,
        ..base_config()
    };

    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = sampler::sample(&mut source, &pool, &config, &mut rng).await;

        // At most three such tracks ever fit
        assert!(outcome.total_ms <= config.max_runtime_ms);
        assert!(outcome.picked.len() <= 3);
    }
}

#[tokio::test]
async fn test_sample_credits_every_artist_on_the_track() {
    // One track credited to two artists
    let featured = Track {
        artists: vec![
            TrackArtist {
                id: Some("a1".to_string()),
                name: "Artist One".to_string(),
            },
            TrackArtist {
                id: Some("a2".to_string()),
                name: "Artist Two".to_string(),
            },
        ],
        ..track("duet", "a1", "Artist One", 180_000)
    };

    let mut albums: HashMap<String, Vec<Album>> = HashMap::new();
    albums.insert(
        "a1".to_string(),
        vec![album("a1_album", "a1", "Artist One")],
    );
    let mut tracks: HashMap<String, Vec<Track>> = HashMap::new();
    tracks.insert("a1_album".to_string(), vec![featured]);

    let mut source = FakeSource {
        albums,
        tracks,
        saved: HashSet::new(),
    };
    let pool = vec![artist("a1", "Artist One")];

    let config = SamplerConfig {
        target_count: 3,
        max_per_artist: 1,
        max_attempts: 30,
        ..base_config()
    };
    let mut rng = StdRng::seed_from_u64(5);

    let outcome = sampler::sample(&mut source, &pool, &config, &mut rng).await;

    // Accepted once, and both credited artists reached the cap
    assert_eq!(outcome.picked.len(), 1);
    assert_eq!(outcome.artist_counts.get("a1"), Some(&1));
    assert_eq!(outcome.artist_counts.get("a2"), Some(&1));
    assert_eq!(outcome.stop, StopReason::AttemptsExhausted);
}

#[tokio::test]
async fn test_sample_artist_without_albums_costs_only_an_attempt() {
    let (mut pool, mut source) = catalog(&[("a1", "Artist One")], 2, 180_000);
    pool.push(artist("ghost", "No Catalog"));

    let config = SamplerConfig {
        target_count: 2,
        ..base_config()
    };
    let mut rng = StdRng::seed_from_u64(11);

    let outcome = sampler::sample(&mut source, &pool, &config, &mut rng).await;

    // The artist with no albums never shows up in the counts
    assert!(!outcome.artist_counts.contains_key("ghost"));
    assert_eq!(outcome.picked.len(), 2);
}

#[tokio::test]
async fn test_sample_empty_pool_terminates_immediately() {
    let (_, mut source) = catalog(&[("a1", "Artist One")], 1, 180_000);
    let config = base_config();
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = sampler::sample(&mut source, &[], &config, &mut rng).await;

    assert!(outcome.picked.is_empty());
    assert_eq!(outcome.attempts, 0);
    assert_eq!(outcome.stop, StopReason::AttemptsExhausted);
}
