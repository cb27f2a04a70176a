//! # slack-status infrastructure
//!
//! Implementations of the `slack-status-core` ports.
//!
//! This crate contains:
//! - Configuration directory resolution and environment loading
//! - The JSON credential file and the legacy token file
//! - TLS material sources for the callback listener
//! - The loopback OAuth callback listener, token exchange and REST client
//!
//! ## Architecture
//! - Implements traits defined in `slack-status-core`
//! - Contains all "impure" code (filesystem, sockets, HTTP)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod storage;
pub mod tls;

// Re-export commonly used items
pub use config::{load_from_env, ConfigDir};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::slack::{LoopbackCallbackListener, SlackApiClient, SlackTokenExchanger};
pub use storage::JsonCredentialFile;
pub use tls::{EmbeddedPair, InstalledPair, SelfSignedPair};
