//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`connection::ConnectionState`]: feed connectivity as seen by consumers
//! - [`transport::TransportMode`]: push vs. pull delivery, chosen once

pub mod connection;
pub mod error;
pub mod transport;
