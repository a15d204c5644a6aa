//! Status update datagram (JSON).
//!
//! One datagram carries exactly one update. Keys are single letters because the
//! same names repeat in every packet:
//!
//! | key | meaning                                  | used when  |
//! |-----|------------------------------------------|------------|
//! | `I` | request id, unique per backend + sender  | always     |
//! | `B` | backend in `ip:port` form                | always     |
//! | `C` | kind: 1 = started, 2 = finished          | always     |
//! | `T` | seconds spent processing                 | `C == 2`   |
//! | `R` | response status (may be a proxy sentinel) | `C == 2`   |
//! | `U` | uri sent to the backend, with query      | `C == 1`   |
//!
//! Lowercase keys and the long names (`id`, `backend`, `code`, `time`,
//! `status`, `uri`) are accepted as aliases. Unknown keys are ignored and
//! missing keys take their zero value, matching what the senders in the field
//! have always relied on. A field may appear once: sending both a key and one
//! of its aliases (`{"I":1,"id":2}`) is a duplicate and the datagram is
//! rejected rather than guessing which value wins.

use serde::Deserialize;

use crate::error::{BackstatError, Result};

/// `C` value announcing a request handed to a backend.
pub const CODE_STARTED: u8 = 1;
/// `C` value announcing a request that finished.
pub const CODE_FINISHED: u8 = 2;

/// Decoded status update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Update {
    /// Request id, only unique within a (backend, sender) pair.
    #[serde(rename = "I", alias = "i", alias = "id", default)]
    pub request_seq: i64,
    /// Backend in `ip:port` form.
    #[serde(rename = "B", alias = "b", alias = "backend", default)]
    pub backend: String,
    /// Raw kind code; see [`Update::kind`].
    #[serde(rename = "C", alias = "c", alias = "code", default)]
    pub code: u8,
    /// Seconds the request spent processing.
    #[serde(rename = "T", alias = "t", alias = "time", default)]
    pub elapsed_secs: f64,
    /// Response status. Opaque: the proxy may send sentinels that are not HTTP codes.
    #[serde(rename = "R", alias = "r", alias = "status", default)]
    pub status: i64,
    /// Uri including query string.
    #[serde(rename = "U", alias = "u", alias = "uri", default)]
    pub uri: String,
}

/// What an update announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Started,
    Finished,
    /// Anything else. Kept so the apply step can report it.
    Unknown(u8),
}

impl From<u8> for UpdateKind {
    fn from(code: u8) -> Self {
        match code {
            CODE_STARTED => UpdateKind::Started,
            CODE_FINISHED => UpdateKind::Finished,
            other => UpdateKind::Unknown(other),
        }
    }
}

impl Update {
    pub fn kind(&self) -> UpdateKind {
        UpdateKind::from(self.code)
    }
}

/// Decode one datagram payload.
///
/// Only the shape is checked here: the payload must be a JSON object of the
/// right field types and name a backend. The kind is left to the apply step.
pub fn decode_update(payload: &[u8]) -> Result<Update> {
    let update: Update = serde_json::from_slice(payload)
        .map_err(|e| BackstatError::BadRequest(format!("invalid update json: {e}")))?;

    if update.backend.is_empty() {
        return Err(BackstatError::MissingField("B"));
    }

    Ok(update)
}
