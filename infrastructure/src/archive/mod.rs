//! Record archiving: machine-readable transcript of the feed.
//!
//! Provides [`JsonlRecordArchive`], a JSONL file writer that implements
//! the [`RecordArchive`](feed_application::RecordArchive) port.

mod jsonl_archive;

pub use jsonl_archive::JsonlRecordArchive;
