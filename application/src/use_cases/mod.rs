//! Use cases (application services)
//!
//! - [`run_feed`]: wires a feed source to its consumers and owns the session
//! - [`log_feed`]: moves records into the display buffer
//! - [`phase_engine`]: phase inference with the delayed reset to idle
//! - [`completion_feed`]: "show result" detection

pub mod completion_feed;
pub mod log_feed;
pub mod phase_engine;
pub mod run_feed;
