pub mod github;
pub mod clipboard;
pub mod browser;
pub mod persistence;
