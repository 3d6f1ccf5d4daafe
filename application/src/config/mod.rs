//! Application-level configuration.
//!
//! - [`FeedParams`]: how a feed session consumes records (reset delay, buffer bound)

pub mod feed_params;

pub use feed_params::{DEFAULT_RESET_DELAY, FeedParams};
