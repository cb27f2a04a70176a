//! Multi-domain credential storage

pub mod ports;
pub mod service;

pub use service::CredentialStore;
