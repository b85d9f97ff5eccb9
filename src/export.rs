//! CSV export of the saved-tracks library.

use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;

use crate::{Res, types::SavedTrackItem, utils};

const HEADER: [&str; 8] = [
    "Title",
    "Artists",
    "Album",
    "Duration",
    "Release Date",
    "Popularity",
    "Spotify URL",
    "Track URI",
];

/// One row of the saved-tracks export. Field order defines column order.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SavedTrackRow {
    pub title: String,
    pub artists: String,
    pub album: String,
    pub duration: String,
    pub release_date: String,
    pub popularity: String,
    pub spotify_url: String,
    pub track_uri: String,
}

/// Flattens one saved item into an export row.
///
/// Returns `None` when the item carries no track object. Fields the API did
/// not provide come out as `N/A`, except the duration, which falls back to
/// `0:00`.
pub fn row_from_item(item: &SavedTrackItem) -> Option<SavedTrackRow> {
    let track = item.track.as_ref()?;

    let (album, release_date) = match &track.album {
        Some(album) => (
            album.name.clone(),
            album.release_date.clone().unwrap_or_else(|| "N/A".to_string()),
        ),
        None => ("N/A".to_string(), "N/A".to_string()),
    };

    Some(SavedTrackRow {
        title: track.name.clone(),
        artists: utils::join_artist_names(&track.artists),
        album,
        duration: utils::format_duration_ms(track.duration_ms),
        release_date,
        popularity: track
            .popularity
            .map(|popularity| popularity.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        spotify_url: track
            .external_urls
            .as_ref()
            .and_then(|urls| urls.spotify.clone())
            .unwrap_or_else(|| "N/A".to_string()),
        track_uri: if track.uri.is_empty() {
            "N/A".to_string()
        } else {
            track.uri.clone()
        },
    })
}

/// Writes the export for the given saved items, header line included even
/// when there are no rows.
pub fn write_csv<W: Write>(writer: W, items: &[SavedTrackItem]) -> Res<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(HEADER)?;

    for item in items {
        if let Some(row) = row_from_item(item) {
            writer.serialize(&row)?;
        }
    }

    writer.flush()?;
    Ok(())
}
