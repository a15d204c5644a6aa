//! Snapshot publishing over HTTP.
//!
//! Readers never touch live state: each request takes a registry snapshot,
//! releases the lock, then serializes the copy.

mod error;
mod world;

pub use error::ApiError;
pub use world::{world_json, CORS_MAX_AGE_SECS};
