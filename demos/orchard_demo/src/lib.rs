//! Orchard demo - one pass of seed, delete, find and update
//!
//! The binary opens the configured store, runs [`scenario::run`] and exits.
//! The scenario is a library so it can run against in-memory stores in tests.

pub mod config;
pub mod scenario;

pub use config::{ConfigError, DemoConfig};
pub use scenario::{run, RunReport};
