//! slack-status - set your Slack status from the terminal
//!
//! Library half of the binary: argument parsing, dependency wiring and the
//! commands, kept out of `main.rs` so they can be tested.

pub mod cli;
pub mod commands;
pub mod context;
pub mod prompt;
pub mod utils;

pub use cli::Cli;
pub use context::AppContext;
