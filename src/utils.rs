use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::TrackArtist;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn format_duration_ms(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

pub fn join_artist_names(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

fn normalize_match_part(value: &str) -> String {
    let lowered = value.to_lowercase();
    // Relisted albums often retag the same track with a remaster suffix
    // after a dash; strip that so both listings land on one key.
    let base = match lowered.split_once(" - ") {
        Some((head, tail)) if tail.contains("remaster") => head,
        _ => lowered.as_str(),
    };
    base.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn normalize_match_key(title: &str, primary_artist: &str) -> String {
    format!(
        "{}::{}",
        normalize_match_part(title),
        normalize_match_part(primary_artist)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavedMatchMode {
    #[default]
    Id,
    NameArtist,
}

impl fmt::Display for SavedMatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavedMatchMode::Id => write!(f, "id"),
            SavedMatchMode::NameArtist => write!(f, "name-artist"),
        }
    }
}

pub fn parse_match_mode(input: &str) -> Result<SavedMatchMode, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("match mode cannot be empty".to_string());
    }

    match trimmed.to_lowercase().replace('_', "-").as_str() {
        "id" => Ok(SavedMatchMode::Id),
        "name-artist" => Ok(SavedMatchMode::NameArtist),
        other => Err(format!(
            "invalid value '{}' [possible values: id, name-artist]",
            other
        )),
    }
}
