//! Domain utilities

pub mod status_args;
