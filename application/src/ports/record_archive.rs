//! Port for archiving accepted log records.
//!
//! Separate from `tracing` diagnostics: this captures the feed transcript in
//! a machine-readable form. `append` is synchronous and non-fallible so a
//! failing archive never disrupts the feed.

use feed_domain::LogRecord;

pub trait RecordArchive: Send + Sync {
    fn append(&self, record: &LogRecord);
}

/// No-op implementation for tests and when archiving is disabled.
pub struct NoRecordArchive;

impl RecordArchive for NoRecordArchive {
    fn append(&self, _record: &LogRecord) {}
}
