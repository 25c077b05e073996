pub mod commands;
pub mod queries;
pub mod load;
pub mod notification;

// Re-exports
pub use commands::*;
pub use queries::*;
pub use load::*;
pub use notification::*;
