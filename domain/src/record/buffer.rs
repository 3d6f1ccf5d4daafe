//! Ordered, deduplicated store of log records.
//!
//! [`LogBuffer`] keeps records in arrival order (not timestamp order) and
//! rejects any record whose timestamp was already stored. An optional
//! capacity evicts oldest-first, keeping the dedup set consistent with the
//! stored records.

use super::entities::LogRecord;
use std::collections::{HashSet, VecDeque};

/// Result of [`LogBuffer::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Record was stored.
    Appended,
    /// A record with the same timestamp is already stored; nothing changed.
    Duplicate,
    /// The record was a `clear` control record; the buffer is now empty.
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    records: VecDeque<LogRecord>,
    seen: HashSet<String>,
    capacity: Option<usize>,
}

impl LogBuffer {
    /// Create an unbounded buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding at most `capacity` records (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(1024)),
            seen: HashSet::new(),
            capacity: Some(capacity.max(1)),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn append(&mut self, record: LogRecord) -> AppendOutcome {
        if record.is_clear() {
            self.clear();
            return AppendOutcome::Cleared;
        }

        if self.seen.contains(&record.timestamp) {
            return AppendOutcome::Duplicate;
        }

        if let Some(capacity) = self.capacity {
            while self.records.len() >= capacity {
                if let Some(evicted) = self.records.pop_front() {
                    self.seen.remove(&evicted.timestamp);
                }
            }
        }

        self.seen.insert(record.timestamp.clone());
        self.records.push_back(record);
        AppendOutcome::Appended
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.seen.clear();
    }

    pub fn contains(&self, timestamp: &str) -> bool {
        self.seen.contains(timestamp)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display (arrival) order.
    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }

    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.records.iter().cloned().collect()
    }
}
