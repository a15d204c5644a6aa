//! Live model of what every monitored backend is doing.
//!
//! The registry is process-wide state, created once at startup and never torn
//! down. Backends appear on the first datagram naming them and are never
//! removed, even when their proxies stop reporting.
//!
//! Concurrency: one coarse `RwLock` over the whole map. The ingest loop is the
//! only writer (`apply`); snapshot readers take the shared side just long
//! enough to clone the map, so serialization never runs under the lock and no
//! reader sees a backend halfway through an update.

mod backend;
mod history;

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::Serialize;

use backstat_core::protocol::update::{Update, UpdateKind};

pub use backend::{BackendState, CompletedRequest, FinishOutcome, InFlightRequest, RequestMap, StartOutcome};
pub use history::CompletedHistory;

/// Nanoseconds since the Unix epoch.
pub fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

/// What a single update did to the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// New in-flight request recorded.
    Started,
    /// In-flight request promoted to the completed history.
    Completed { evicted: Option<i64> },
    /// Start reused an open id; the open request was dropped and the new one discarded.
    DuplicateStart,
    /// Finish for an id with nothing open. No change.
    UnknownRequest,
    /// Kind code outside the protocol. No change.
    UnknownKind(u8),
}

impl ApplyOutcome {
    /// Metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplyOutcome::Started => "started",
            ApplyOutcome::Completed { .. } => "completed",
            ApplyOutcome::DuplicateStart => "duplicate_start",
            ApplyOutcome::UnknownRequest => "unknown_request",
            ApplyOutcome::UnknownKind(_) => "unknown_kind",
        }
    }
}

/// Point-in-time copy of the registry, ready to serialize.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorldSnapshot {
    /// Capture time, nanoseconds since the Unix epoch.
    pub current_time: i64,
    pub world: BTreeMap<String, BackendState>,
}

impl WorldSnapshot {
    pub fn backend(&self, ipport: &str) -> Option<&BackendState> {
        self.world.get(ipport)
    }
}

/// Cheap counters for the metrics endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub backends: usize,
    pub in_flight: usize,
    pub completed: usize,
}

#[derive(Default)]
struct World {
    backends: BTreeMap<String, BackendState>,
}

pub struct Registry {
    world: RwLock<World>,
    completed_capacity: usize,
}

impl Registry {
    pub fn new(completed_capacity: usize) -> Self {
        Self {
            world: RwLock::new(World::default()),
            completed_capacity,
        }
    }

    /// Apply one decoded update received from `sender`.
    pub fn apply(&self, update: &Update, sender: &str) -> ApplyOutcome {
        self.apply_at(update, sender, now_nanos())
    }

    /// Same as [`Registry::apply`] with an explicit receive time.
    pub fn apply_at(&self, update: &Update, sender: &str, now: i64) -> ApplyOutcome {
        let mut world = self.write();
        let backends = &mut world.backends;

        // Any decoded update makes the backend and sender known, whatever its kind.
        // The key is only allocated for a backend seen for the first time.
        match backends.get_mut(update.backend.as_str()) {
            Some(backend) => apply_to(backend, update, sender, now),
            None => {
                let mut backend = BackendState::new(update.backend.clone(), self.completed_capacity);
                let outcome = apply_to(&mut backend, update, sender, now);
                backends.insert(update.backend.clone(), backend);
                outcome
            }
        }
    }

    /// Consistent copy of every backend plus the capture time.
    pub fn snapshot(&self) -> WorldSnapshot {
        let world = self.read().backends.clone();
        WorldSnapshot {
            current_time: now_nanos(),
            world,
        }
    }

    pub fn stats(&self) -> RegistryStats {
        let world = self.read();
        let mut stats = RegistryStats::default();
        for backend in world.backends.values() {
            stats.backends += 1;
            stats.in_flight += backend.in_flight_count();
            stats.completed += backend.completed.len();
        }
        stats
    }

    // The only code running under the lock is map manipulation; a poisoned
    // lock still holds a consistent world, so keep serving it.
    fn read(&self) -> RwLockReadGuard<'_, World> {
        self.world.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, World> {
        self.world.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply_to(backend: &mut BackendState, update: &Update, sender: &str, now: i64) -> ApplyOutcome {
    backend.touch_sender(sender);

    match update.kind() {
        UpdateKind::Started => {
            match backend.start(sender, update.request_seq, update.uri.clone(), now) {
                StartOutcome::Opened => ApplyOutcome::Started,
                StartOutcome::Collided => ApplyOutcome::DuplicateStart,
            }
        }
        UpdateKind::Finished => {
            match backend.finish(sender, update.request_seq, update.elapsed_secs, update.status) {
                FinishOutcome::Completed { evicted } => ApplyOutcome::Completed { evicted },
                FinishOutcome::UnknownId => ApplyOutcome::UnknownRequest,
            }
        }
        UpdateKind::Unknown(code) => ApplyOutcome::UnknownKind(code),
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(500)
    }
}
