//! External service integrations

pub mod slack;
