//! Lightweight in-process metrics.
//!
//! Metrics are stored as atomics and rendered by the `/metrics` handler.
//! Registry-derived gauges are computed at scrape time instead of being kept
//! in sync on every update.

pub mod metrics;
