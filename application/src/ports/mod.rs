//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod connectivity_probe;
pub mod feed_source;
pub mod presenter;
pub mod record_archive;
