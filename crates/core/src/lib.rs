//! gitact core - pure domain logic with no I/O
//!
//! This crate contains the domain types, the statistics and aggregation
//! functions, the load/notification state machines and the ports
//! (interfaces) for gitact. It has no dependencies on UI frameworks, HTTP
//! clients or the OS clipboard - those are handled by adapters.

pub mod domain;
pub mod ports;
pub mod app;
pub mod error;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
