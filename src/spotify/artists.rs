use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config,
    management::TokenManager,
    spotify::http,
    types::{Artist, FollowedArtistsResponse},
};

/// Retrieves every artist the authenticated user follows.
///
/// Drains Spotify's cursor-based pagination of the `/me/following` endpoint,
/// fifty artists per page, following the `after` cursor until it runs out.
/// A progress spinner reports the running count while pages are fetched.
///
/// # Arguments
///
/// * `token_mgr` - Token manager used to obtain a valid access token per page
///
/// # Returns
///
/// Returns the full list of followed artists, or the first non-retryable
/// HTTP error encountered.
///
/// # Rate Limits
///
/// Each page request goes through [`http::send_with_retry`], so rate-limited
/// responses back off and retry before failing.
pub async fn get_followed_artists(
    token_mgr: &mut TokenManager,
) -> Result<Vec<Artist>, reqwest::Error> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching followed artists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut artists: Vec<Artist> = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let token = token_mgr.get_valid_token().await;
        let mut api_url = format!(
            "{uri}/me/following?type=artist&limit=50",
            uri = &config::spotify_apiurl()
        );
        if let Some(after_val) = &after {
            api_url.push_str(&format!("&after={}", after_val));
        }

        let response =
            match http::send_with_retry(|| Client::new().get(&api_url).bearer_auth(&token)).await {
                Ok(resp) => resp,
                Err(err) => {
                    pb.finish_and_clear();
                    return Err(err);
                }
            };

        let res = match response.json::<FollowedArtistsResponse>().await {
            Ok(res) => res,
            Err(err) => {
                pb.finish_and_clear();
                return Err(err);
            }
        };

        artists.extend(res.artists.items);
        pb.set_message(format!("Fetching followed artists... {}", artists.len()));

        after = res.artists.cursors.and_then(|c| c.after);
        if after.is_none() {
            break;
        }
    }

    pb.finish_and_clear();
    Ok(artists)
}
