//! backstat server library entry.
//!
//! This crate wires the UDP ingest loop, the backend registry, and the HTTP
//! snapshot publisher into one collector process. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod ingest;
pub mod lifecycle;
pub mod obs;
pub mod ops;
pub mod publish;
pub mod registry;
pub mod router;
pub mod server;
