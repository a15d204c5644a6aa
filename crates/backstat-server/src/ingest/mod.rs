//! UDP ingest: receive status datagrams and fold them into the registry.
//!
//! The ingest loop is the registry's only writer. Datagrams are applied in the
//! order the socket hands them over; nothing is buffered or reordered here.

pub mod codec;
mod ingestor;

pub use codec::{decode, Inbound};
pub use ingestor::Ingestor;
