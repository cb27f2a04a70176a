//! Applying a parsed status request to the chat service

pub mod ports;
pub mod service;

pub use service::StatusService;
