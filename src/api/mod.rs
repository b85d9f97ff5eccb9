//! # API Module
//!
//! HTTP endpoints for the local web server that backs the OAuth flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles OAuth callback requests from Spotify's authorization
//!   server. Completes the PKCE authentication flow by exchanging the
//!   authorization code for an access token.
//! - [`health`] - Health check returning application status and version.
//!
//! Both handlers are plain async functions wired into an [Axum](https://docs.rs/axum)
//! router by [`crate::server::start_api_server`]. The server only runs for the
//! duration of the `auth` command.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
