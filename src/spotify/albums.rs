use reqwest::Client;

use crate::{
    config,
    management::TokenManager,
    spotify::http,
    types::{Album, AlbumTracksResponse, ArtistAlbumsResponse, Track},
};

/// Retrieves the albums and singles credited to an artist.
///
/// Pages through `/artists/{id}/albums` with `include_groups=album,single`.
/// Pagination stops early at the first album the artist is not credited on,
/// returning everything collected up to that point.
pub async fn get_artist_albums(
    token_mgr: &mut TokenManager,
    artist_id: &str,
) -> Result<Vec<Album>, reqwest::Error> {
    let mut albums: Vec<Album> = Vec::new();
    let mut url = format!(
        "{uri}/artists/{id}/albums?include_groups=album,single&limit=50",
        uri = &config::spotify_apiurl(),
        id = artist_id
    );

    loop {
        let token = token_mgr.get_valid_token().await;
        let response =
            http::send_with_retry(|| Client::new().get(&url).bearer_auth(&token)).await?;
        let res = response.json::<ArtistAlbumsResponse>().await?;

        for album in res.items {
            // The endpoint can leak unrelated albums deep into pagination;
            // stop at the first one the artist is not credited on.
            if album.artists.iter().any(|artist| artist.id == artist_id) {
                albums.push(album);
            } else {
                return Ok(albums);
            }
        }

        match res.next {
            Some(next) => url = next,
            None => break,
        }
    }

    Ok(albums)
}

/// Retrieves the track listing of an album, following pagination.
pub async fn get_album_tracks(
    token_mgr: &mut TokenManager,
    album_id: &str,
) -> Result<Vec<Track>, reqwest::Error> {
    let mut tracks: Vec<Track> = Vec::new();
    let mut url = format!(
        "{uri}/albums/{id}/tracks?limit=50",
        uri = &config::spotify_apiurl(),
        id = album_id
    );

    loop {
        let token = token_mgr.get_valid_token().await;
        let response =
            http::send_with_retry(|| Client::new().get(&url).bearer_auth(&token)).await?;
        let res = response.json::<AlbumTracksResponse>().await?;
        tracks.extend(res.items);

        match res.next {
            Some(next) => url = next,
            None => break,
        }
    }

    Ok(tracks)
}
