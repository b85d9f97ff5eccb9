use chrono::{Duration, Utc};

use crate::{
    curation::{recency, reconcile},
    error, info,
    management::TokenManager,
    spotify, success, warning,
};

pub async fn rolling(days: u32, name: Option<String>, pin: bool) {
    let playlist_name = name.unwrap_or_else(|| format!("Last {} days", days));

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

    let cutoff = Utc::now() - Duration::days(days as i64);
    let recent = recency::filter_by_window(saved, cutoff);
    info!("Found {} tracks in the last {} days", recent.len(), days);

    let desired = recency::track_ids(&recent);

    let existing = match spotify::playlists::find_by_name(&mut token_mgr, &playlist_name).await {
        Ok(existing) => existing,
        Err(e) => {
            error!("Failed to look up playlist '{}': {}", playlist_name, e);
        }
    };

    let description = format!(
        "Tracks liked in the last {} days (last updated: {})",
        days,
        Utc::now().format("%Y-%m-%d")
    );

    let is_new = existing.is_none();
    let (playlist_id, current) = match existing {
        Some(playlist) => {
            info!("Updating existing playlist: {}", playlist.name);

            let current =
                match spotify::playlists::get_playlist_track_ids(&mut token_mgr, &playlist.id)
                    .await
                {
                    Ok(current) => current,
                    Err(e) => {
                        error!("Failed to fetch playlist tracks: {}", e);
                    }
                };

            (playlist.id, current)
        }
        None => {
            info!("No playlist named '{}' yet, creating one", playlist_name);

            let created =
                match spotify::playlists::create(&mut token_mgr, &playlist_name, &description)
                    .await
                {
                    Ok(created) => created,
                    Err(e) => {
                        error!("Failed to create playlist: {}", e);
                    }
                };

            // A fresh playlist has no tracks, so the delta below degenerates
            // to adding everything.
            (created.id, Vec::new())
        }
    };

    let delta = reconcile::diff(&current, &desired);

    if delta.is_noop() {
        info!("Playlist is already up to date");
    } else {
        for (index, batch) in delta
            .to_add
            .chunks(reconcile::PLAYLIST_BATCH_SIZE)
            .enumerate()
        {
            match spotify::playlists::add_tracks(&mut token_mgr, &playlist_id, batch).await {
                Ok(_) => info!("Added batch {}: {} tracks", index + 1, batch.len()),
                Err(e) => {
                    error!("Failed to add tracks to playlist: {}", e);
                }
            }
        }
        if !delta.to_add.is_empty() {
            info!("Added {} tracks to playlist", delta.to_add.len());
        }

        for (index, batch) in delta
            .to_remove
            .chunks(reconcile::PLAYLIST_BATCH_SIZE)
            .enumerate()
        {
            match spotify::playlists::remove_tracks(&mut token_mgr, &playlist_id, batch).await {
                Ok(_) => info!("Removed batch {}: {} tracks", index + 1, batch.len()),
                Err(e) => {
                    error!("Failed to remove tracks from playlist: {}", e);
                }
            }
        }
        if !delta.to_remove.is_empty() {
            info!("Removed {} tracks from playlist", delta.to_remove.len());
        }
    }

    if !is_new {
        if let Err(e) =
            spotify::playlists::change_description(&mut token_mgr, &playlist_id, &description)
                .await
        {
            warning!("Failed to update playlist description: {}", e);
        }
    }

    success!("Playlist '{}' updated successfully!", playlist_name);

    if pin {
        match spotify::playlists::follow(&mut token_mgr, &playlist_id).await {
            Ok(()) => success!("Pinned playlist: {}", playlist_name),
            Err(e) => warning!("Could not pin playlist: {}", e),
        }
    }

    info!(
        "Playlist URL: https://open.spotify.com/playlist/{}",
        playlist_id
    );
}
