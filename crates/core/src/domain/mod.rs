pub mod event;
pub mod repo;
pub mod stats;
pub mod activity;
pub mod summary;
pub mod events;

// Re-exports for convenience
pub use event::*;
pub use repo::*;
pub use stats::*;
pub use activity::*;
pub use summary::*;
pub use events::*;
