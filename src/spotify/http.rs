use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::warning;

const MAX_RETRIES: u32 = 5;
const INITIAL_DELAY_SECS: u64 = 1;
const MAX_DELAY_SECS: u64 = 30;

/// Sends a request, retrying rate-limited responses with exponential backoff.
///
/// The closure builds a fresh request for every attempt since a
/// [`RequestBuilder`] is consumed on send. Only 429 Too Many Requests is
/// retried: the delay starts at one second and doubles up to a 30 second cap,
/// with a `Retry-After` header overriding the computed delay (capped the same
/// way). After five attempts, or on any other error status, the failure is
/// surfaced through [`Response::error_for_status`].
///
/// # Arguments
///
/// * `build` - Closure producing the request to send, invoked once per attempt
///
/// # Returns
///
/// Returns the successful [`Response`], or the `reqwest::Error` of the first
/// non-rate-limit failure or the final exhausted attempt.
pub async fn send_with_retry<F>(build: F) -> Result<Response, reqwest::Error>
where
    F: Fn() -> RequestBuilder,
{
    let mut delay = INITIAL_DELAY_SECS;
    let mut attempt = 1;

    loop {
        let response = build().send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS && attempt < MAX_RETRIES {
            let wait = retry_after_secs(&response)
                .unwrap_or(delay)
                .min(MAX_DELAY_SECS);
            warning!(
                "Rate limited, retrying in {}s (attempt {}/{})",
                wait,
                attempt,
                MAX_RETRIES
            );
            sleep(Duration::from_secs(wait)).await;
            delay = (delay * 2).min(MAX_DELAY_SECS);
            attempt += 1;
            continue;
        }

        return response.error_for_status();
    }
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
}
