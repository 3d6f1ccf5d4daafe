//! Output formatting and the console presenter

pub mod console;
pub mod presenter;
