//! Configuration loading and the configuration directory
//!
//! This module resolves application settings from the environment and
//! locates the per-user directory holding credentials and certificates.

pub mod loader;
pub mod paths;

// Re-export commonly used items
pub use loader::load_from_env;
pub use paths::ConfigDir;
