//! Playlist curation logic.
//!
//! The modules here hold the decision-making half of the tool and are kept
//! free of HTTP concerns so they can be tested against in-memory data:
//!
//! - **`reconcile`**: set difference between a playlist's current contents
//!   and a desired track list, applied in bounded batches by the callers.
//! - **`recency`**: filtering of saved tracks against an inclusive cutoff.
//! - **`sampler`**: constrained random selection of tracks from followed
//!   artists' catalogs.
//! - **`discovery`**: scaffolding for a generative discovery mode that is
//!   not wired to a model yet.

pub mod discovery;
pub mod recency;
pub mod reconcile;
pub mod sampler;
