//! Log records and the display buffer.

pub mod buffer;
pub mod entities;

pub use buffer::{AppendOutcome, LogBuffer};
pub use entities::{LogKind, LogRecord};
