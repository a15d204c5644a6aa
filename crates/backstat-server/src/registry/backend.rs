use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use super::history::CompletedHistory;

/// Requests a single sender has open on a backend, keyed by request id.
pub type RequestMap = BTreeMap<i64, InFlightRequest>;

/// Ids are rendered as strings; dashboards index by them.
fn id_as_string<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

/// A request the proxy handed to the backend and has not reported back on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InFlightRequest {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub uri: String,
    /// Nanoseconds since the Unix epoch when the start was received.
    pub start_time: i64,
}

/// A finished request. Never modified once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompletedRequest {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub sender: String,
    pub uri: String,
    /// Seconds spent processing, as reported by the proxy.
    pub time: f64,
    pub start_time: i64,
    /// Passed through verbatim; may be a proxy sentinel rather than an HTTP status.
    pub response_code: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Opened,
    /// Id already open for this sender. Both the old and new request are gone.
    Collided,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinishOutcome {
    Completed { evicted: Option<i64> },
    UnknownId,
}

/// Everything known about one monitored backend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BackendState {
    pub ipport: String,
    pub completed: CompletedHistory,
    /// sender address -> open requests.
    pub in_flight: BTreeMap<String, RequestMap>,
}

impl BackendState {
    pub fn new(ipport: String, completed_capacity: usize) -> Self {
        Self {
            ipport,
            completed: CompletedHistory::with_capacity(completed_capacity),
            in_flight: BTreeMap::new(),
        }
    }

    /// Make sure the sender has an (possibly empty) request map.
    pub fn touch_sender(&mut self, sender: &str) -> &mut RequestMap {
        self.in_flight.entry(sender.to_string()).or_default()
    }

    pub fn start(&mut self, sender: &str, id: i64, uri: String, now: i64) -> StartOutcome {
        let open = self.touch_sender(sender);
        match open.entry(id) {
            Entry::Occupied(slot) => {
                // Id reused while still open: drop both.
                slot.remove();
                StartOutcome::Collided
            }
            Entry::Vacant(slot) => {
                slot.insert(InFlightRequest {
                    id,
                    uri,
                    start_time: now,
                });
                StartOutcome::Opened
            }
        }
    }

    pub fn finish(&mut self, sender: &str, id: i64, time: f64, response_code: i64) -> FinishOutcome {
        let Some(open) = self.touch_sender(sender).remove(&id) else {
            return FinishOutcome::UnknownId;
        };

        let done = CompletedRequest {
            id: open.id,
            sender: sender.to_string(),
            uri: open.uri,
            time,
            start_time: open.start_time,
            response_code,
        };
        let evicted = self.completed.push_front(done).map(|r| r.id);
        FinishOutcome::Completed { evicted }
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.values().map(|m| m.len()).sum()
    }

    pub fn in_flight_for(&self, sender: &str) -> usize {
        self.in_flight.get(sender).map(|m| m.len()).unwrap_or(0)
    }
}
