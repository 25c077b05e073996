pub mod github;
pub mod actions;
pub mod persistence;

// Re-exports
pub use github::*;
pub use actions::*;
pub use persistence::*;
