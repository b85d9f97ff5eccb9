//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API, implementing
//! authentication, data retrieval, and playlist management functionality. It is
//! the integration layer between the CLI commands and Spotify's services,
//! handling HTTP communication, the OAuth flow, error handling, and rate
//! limiting.
//!
//! ## Architecture
//!
//! Each submodule handles a specific domain of the Web API:
//!
//! ```text
//! Application Layer (CLI, Curation)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Library (saved tracks, membership checks)
//!     ├── Artists (followed artists)
//!     ├── Albums (artist discographies, album tracks)
//!     └── Playlists (create, reconcile, follow)
//!          ↓
//! HTTP Layer (reqwest, JSON, retry)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: code verifier/challenge generation, the
//!   browser hand-off, and the token exchange. Works together with the local
//!   callback server in [`crate::server`].
//! - [`http`] - Shared request helper with bounded exponential backoff for
//!   rate-limited responses. All other submodules send through it.
//! - [`library`] - The user's saved tracks: full paginated export and batched
//!   "is this track saved" membership checks.
//! - [`artists`] - Followed artists via cursor-based pagination.
//! - [`albums`] - Artist discographies and album track listings, both
//!   offset-paginated.
//! - [`playlists`] - Playlist listing, lookup by name, content reads, creation,
//!   description updates, batched track adds/removals, and following.
//!
//! ## Error Handling
//!
//! Only HTTP 429 (rate limiting) is retried, with exponential backoff and
//! respect for the `Retry-After` header; the retry budget is bounded. Every
//! other failure status is surfaced immediately through
//! [`reqwest::Response::error_for_status`] so callers can decide whether to
//! abort or skip.
//!
//! ## API Coverage
//!
//! - `GET /me/tracks` - Saved tracks with offset pagination
//! - `GET /me/tracks/contains` - Batched saved-track membership checks
//! - `GET /me/following?type=artist` - Followed artists with cursor pagination
//! - `GET /artists/{id}/albums` - Artist discography
//! - `GET /albums/{id}/tracks` - Album track listing
//! - `GET /me/playlists` - The user's playlists
//! - `GET /playlists/{id}/tracks` - Playlist contents
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `PUT /playlists/{id}` - Change playlist details
//! - `POST /playlists/{id}/tracks` - Add tracks (batched)
//! - `DELETE /playlists/{id}/tracks` - Remove tracks (batched)
//! - `PUT /playlists/{id}/followers` - Follow (pin) a playlist
//! - `POST /api/token` - Token exchange and refresh

pub mod albums;
pub mod artists;
pub mod auth;
pub mod http;
pub mod library;
pub mod playlists;
