use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config,
    management::TokenManager,
    spotify::http,
    types::{SavedTrackItem, SavedTracksResponse},
};

/// Maximum number of track IDs per membership check request.
const CONTAINS_BATCH_SIZE: usize = 50;

/// Retrieves the user's complete saved-track library.
///
/// Pages through `/me/tracks` fifty items at a time, following the `next`
/// URL of each response until the library is exhausted. Items are returned
/// in the API's order, which is most recently added first. A progress
/// spinner reports the running count against the library total.
///
/// # Arguments
///
/// * `token_mgr` - Token manager used to obtain a valid access token per page
///
/// # Returns
///
/// Returns all saved track items with their `added_at` timestamps, or the
/// first non-retryable HTTP error encountered.
pub async fn get_saved_tracks(
    token_mgr: &mut TokenManager,
) -> Result<Vec<SavedTrackItem>, reqwest::Error> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching saved tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut items: Vec<SavedTrackItem> = Vec::new();
    let mut url = format!("{uri}/me/tracks?limit=50", uri = &config::spotify_apiurl());

    loop {
        let token = token_mgr.get_valid_token().await;

        let response =
            match http::send_with_retry(|| Client::new().get(&url).bearer_auth(&token)).await {
                Ok(resp) => resp,
                Err(err) => {
                    pb.finish_and_clear();
                    return Err(err);
                }
            };

        let res = match response.json::<SavedTracksResponse>().await {
            Ok(res) => res,
            Err(err) => {
                pb.finish_and_clear();
                return Err(err);
            }
        };

        items.extend(res.items);
        match res.total {
            Some(total) => pb.set_message(format!(
                "Fetching saved tracks... {}/{}",
                items.len(),
                total
            )),
            None => pb.set_message(format!("Fetching saved tracks... {}", items.len())),
        }

        match res.next {
            Some(next) => url = next,
            None => break,
        }
    }

    pb.finish_and_clear();
    Ok(items)
}

/// Checks which of the given tracks are already in the user's library.
///
/// Splits the IDs into batches of fifty (the API limit for
/// `/me/tracks/contains`) and concatenates the boolean answers, preserving
/// the input order. An empty input returns an empty result without making
/// a request.
///
/// # Arguments
///
/// * `token_mgr` - Token manager used to obtain a valid access token per batch
/// * `track_ids` - Track IDs to check, in the order answers are wanted
///
/// # Returns
///
/// Returns one boolean per input ID, `true` when the track is saved.
pub async fn saved_tracks_contain(
    token_mgr: &mut TokenManager,
    track_ids: &[String],
) -> Result<Vec<bool>, reqwest::Error> {
    let mut results = Vec::with_capacity(track_ids.len());

    for chunk in track_ids.chunks(CONTAINS_BATCH_SIZE) {
        let token = token_mgr.get_valid_token().await;
        let api_url = format!(
            "{uri}/me/tracks/contains?ids={ids}",
            uri = &config::spotify_apiurl(),
            ids = chunk.join(",")
        );

        let response =
            http::send_with_retry(|| Client::new().get(&api_url).bearer_auth(&token)).await?;
        let flags = response.json::<Vec<bool>>().await?;
        results.extend(flags);
    }

    Ok(results)
}
