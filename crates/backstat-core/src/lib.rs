//! backstat core: wire-level update records and the shared error type.
//!
//! This crate defines the datagram contract spoken by the reporting proxies and
//! the error surface shared by the server and its tooling. It carries no
//! transport or runtime dependencies so the decoder can be reused by senders,
//! replay tools and tests alike.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! A malformed datagram must surface as `BackstatError`/`Result` so the
//! listening loop never dies on bad traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{BackstatError, Result};
