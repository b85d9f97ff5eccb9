//! # CLI Module
//!
//! This module provides the command-line interface layer for Spinctl, a
//! Spotify API client for curating playlists out of a user's music library.
//! It implements all user-facing CLI commands and coordinates between the
//! API services, the playlist curation logic, and user interaction.
//!
//! ## Overview
//!
//! The CLI module serves as the primary interface between users and the
//! application's functionality. It provides commands for:
//!
//! - **Authentication Management**: OAuth 2.0 PKCE flow for Spotify API access
//! - **Library Export**: Writing the saved-tracks library to a CSV file
//! - **Rolling Playlists**: Reconciling a playlist against recently liked tracks
//! - **Weekly Mixes**: Assembling a random mix from followed artists' catalogs
//! - **Discovery**: Scaffolding for a generative discovery mode
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Initiates Spotify OAuth authentication flow with PKCE security
//!
//! ### Library Operations
//!
//! - [`export`] - Exports all saved tracks to a CSV file
//!
//! ### Playlist Operations
//!
//! - [`rolling`] - Rebuilds a rolling playlist from recently liked tracks
//! - [`mix`] - Creates a weekly mix playlist from followed artists' catalogs
//! - [`discover`] - Analyzes recent likes and drives the discovery stub
//!
//! ## Architecture Design
//!
//! The CLI module follows a layered architecture approach:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Curation Layer (Reconciliation/Sampling Logic)
//!     ↓
//! API Layer (Spotify Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Each CLI command delegates to the curation and API modules while handling
//! user interaction, progress feedback, and error presentation.
//!
//! ## Error Handling Philosophy
//!
//! Commands exit through the structured logging macros: unrecoverable
//! failures terminate with a clear message and a hint on how to resolve the
//! issue, recoverable ones are logged and worked around. Playlist writes are
//! applied in bounded batches, so a rerun after a partial failure reconciles
//! toward the same state instead of compounding drift.

mod auth;
mod discover;
mod export;
mod mix;
mod rolling;

pub use auth::auth;
pub use discover::discover;
pub use export::export;
pub use mix::mix;
pub use rolling::rolling;
