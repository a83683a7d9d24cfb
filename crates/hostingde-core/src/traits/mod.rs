//! Core traits for the hosting.de client
//!
//! - [`Transport`]: Send a JSON request and return the raw body

pub mod transport;

pub use transport::Transport;
