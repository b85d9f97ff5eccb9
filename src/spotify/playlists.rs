use reqwest::Client;

use crate::{
    config,
    management::TokenManager,
    spotify::http,
    types::{
        AddTracksToPlaylistRequest, ChangePlaylistDetailsRequest, CreatePlaylistRequest,
        CreatePlaylistResponse, GetUserPlaylistsResponse, Playlist, PlaylistItemsResponse,
        PlaylistSnapshotResponse, RemoveTracksFromPlaylistRequest, TrackUri,
    },
    utils,
};

/// Retrieves all playlists of the authenticated user, following pagination.
pub async fn get_user_playlists(
    token_mgr: &mut TokenManager,
) -> Result<Vec<Playlist>, reqwest::Error> {
    let mut playlists: Vec<Playlist> = Vec::new();
    let mut url = format!(
        "{uri}/me/playlists?limit=50",
        uri = &config::spotify_apiurl()
    );

    loop {
        let token = token_mgr.get_valid_token().await;
        let response =
            http::send_with_retry(|| Client::new().get(&url).bearer_auth(&token)).await?;
        let res = response.json::<GetUserPlaylistsResponse>().await?;
        playlists.extend(res.items);

        match res.next {
            Some(next) => url = next,
            None => break,
        }
    }

    Ok(playlists)
}

/// Finds a playlist of the user by exact name match.
///
/// Returns the first playlist whose name equals `name`, or `None` when the
/// user has no playlist with that name.
pub async fn find_by_name(
    token_mgr: &mut TokenManager,
    name: &str,
) -> Result<Option<Playlist>, reqwest::Error> {
    let playlists = get_user_playlists(token_mgr).await?;
    Ok(playlists.into_iter().find(|playlist| playlist.name == name))
}

/// Retrieves the track IDs currently on a playlist, following pagination.
///
/// Items without a track object or without an ID (removed or local tracks)
/// are skipped.
pub async fn get_playlist_track_ids(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
) -> Result<Vec<String>, reqwest::Error> {
    let mut track_ids: Vec<String> = Vec::new();
    let mut url = format!(
        "{uri}/playlists/{id}/tracks?limit=50",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    loop {
        let token = token_mgr.get_valid_token().await;
        let response =
            http::send_with_retry(|| Client::new().get(&url).bearer_auth(&token)).await?;
        let res = response.json::<PlaylistItemsResponse>().await?;

        track_ids.extend(
            res.items
                .into_iter()
                .filter_map(|item| item.track.and_then(|track| track.id)),
        );

        match res.next {
            Some(next) => url = next,
            None => break,
        }
    }

    Ok(track_ids)
}

/// Creates a new private playlist for the configured user.
pub async fn create(
    token_mgr: &mut TokenManager,
    name: &str,
    description: &str,
) -> Result<CreatePlaylistResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config::spotify_apiurl(),
        user_id = &config::spotify_user()
    );

    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public: false,
        collaborative: false,
    };

    let token = token_mgr.get_valid_token().await;
    let response =
        http::send_with_retry(|| Client::new().post(&api_url).bearer_auth(&token).json(&body))
            .await?;

    response.json::<CreatePlaylistResponse>().await
}

/// Rewrites the description of a playlist.
pub async fn change_description(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    description: &str,
) -> Result<(), reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = ChangePlaylistDetailsRequest {
        description: description.to_string(),
    };

    let token = token_mgr.get_valid_token().await;
    http::send_with_retry(|| Client::new().put(&api_url).bearer_auth(&token).json(&body)).await?;

    Ok(())
}

/// Adds tracks to a playlist in a single request.
///
/// The API accepts at most 100 tracks per request; callers are responsible
/// for chunking larger sets.
pub async fn add_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    track_ids: &[String],
) -> Result<PlaylistSnapshotResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = AddTracksToPlaylistRequest {
        uris: track_ids.iter().map(|id| utils::track_uri(id)).collect(),
    };

    let token = token_mgr.get_valid_token().await;
    let response =
        http::send_with_retry(|| Client::new().post(&api_url).bearer_auth(&token).json(&body))
            .await?;

    response.json::<PlaylistSnapshotResponse>().await
}

/// Removes tracks from a playlist in a single request.
///
/// Removes all occurrences of each given track. The API accepts at most 100
/// tracks per request; callers are responsible for chunking larger sets.
pub async fn remove_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    track_ids: &[String],
) -> Result<PlaylistSnapshotResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = RemoveTracksFromPlaylistRequest {
        tracks: track_ids
            .iter()
            .map(|id| TrackUri {
                uri: utils::track_uri(id),
            })
            .collect(),
    };

    let token = token_mgr.get_valid_token().await;
    let response =
        http::send_with_retry(|| Client::new().delete(&api_url).bearer_auth(&token).json(&body))
            .await?;

    response.json::<PlaylistSnapshotResponse>().await
}

/// Follows a playlist so it shows up in the user's library.
pub async fn follow(token_mgr: &mut TokenManager, playlist_id: &str) -> Result<(), reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/followers",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = serde_json::json!({ "public": true });

    let token = token_mgr.get_valid_token().await;
    http::send_with_retry(|| Client::new().put(&api_url).bearer_auth(&token).json(&body)).await?;

    Ok(())
}
