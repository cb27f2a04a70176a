//! # slack-status domain
//!
//! Business domain types for the slack-status CLI.
//!
//! This crate contains:
//! - The credential document and TLS material types
//! - Domain error types and Result definitions
//! - Application configuration structures
//! - The free-form status argument parser
//!
//! ## Architecture
//! - No dependencies on other slack-status crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::status_args::{extract_duration, extract_emoji, parse_status_args};
