use std::collections::VecDeque;

use serde::{Serialize, Serializer};

use super::backend::CompletedRequest;

/// Newest-first list of completed requests with a hard cap.
///
/// Insert at the front, evict from the back. Storage never grows past
/// `capacity` entries.
#[derive(Debug, Clone)]
pub struct CompletedHistory {
    items: VecDeque<CompletedRequest>,
    capacity: usize,
}

impl CompletedHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push the newest entry. Returns the evicted oldest entry, if any.
    pub fn push_front(&mut self, req: CompletedRequest) -> Option<CompletedRequest> {
        self.items.push_front(req);
        if self.items.len() > self.capacity {
            self.items.pop_back()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &CompletedRequest> {
        self.items.iter()
    }

    pub fn contains(&self, sender: &str, id: i64) -> bool {
        self.items.iter().any(|r| r.id == id && r.sender == sender)
    }
}

impl Serialize for CompletedHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}
