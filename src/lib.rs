//! Riskbar - reads colored risk bars from rendered report pages.
//!
//! The extraction itself lives in the `riskbar-engine` crate. This crate
//! adds template configuration, PNG decoding, the HTTP API and the CLI,
//! and exposes its modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
