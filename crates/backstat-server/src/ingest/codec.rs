//! Decode-once codec for the ingest loop.
//!
//! - Payload bytes => `Update` (shape check only, see `backstat_core`)
//! - The sender address is carried along: it is half of the in-flight key

use std::net::SocketAddr;

use backstat_core::{error::Result, protocol::update};

#[derive(Debug)]
pub struct Inbound {
    pub update: update::Update,
    /// Reporting proxy, rendered once as the registry key.
    pub sender: String,
    pub bytes_len: usize,
}

pub fn decode(payload: &[u8], sender: SocketAddr) -> Result<Inbound> {
    let update = update::decode_update(payload)?;
    Ok(Inbound {
        update,
        sender: sender.to_string(),
        bytes_len: payload.len(),
    })
}
