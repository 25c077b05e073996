//! gitact application library
//!
//! Adapters, the app service, the MVU dashboard and the CLI surface of
//! gitact, exposed for testing.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod report;
pub mod runtime;
pub mod services;
pub mod tui;
