//! Completion detection from the record stream.

pub mod patterns;
pub mod watcher;

pub use watcher::{CompletionSignal, CompletionWatcher};
