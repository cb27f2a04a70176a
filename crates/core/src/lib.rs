//! # slack-status core
//!
//! Business logic layer: no filesystem, network or terminal code.
//!
//! This crate contains:
//! - Port interfaces (traits) implemented by `slack-status-infra`
//! - The credential store with its default-domain rules
//! - Certificate resolution and the OAuth authorization flow
//! - Token acquisition and status application services
//!
//! ## Architecture Principles
//! - Only depends on `slack-status-domain`
//! - All external effects go through traits

pub mod auth;
pub mod credentials;
pub mod status;

#[cfg(test)]
mod testing;

pub use auth::ports::{CallbackListener, OperatorPrompt, TlsMaterialStrategy, TokenExchanger};
pub use auth::{
    build_authorization_url, AuthorizationFlow, AuthorizationSession, CertificateResolver,
    LoginOptions, LoginService,
};
pub use credentials::ports::DocumentStore;
pub use credentials::CredentialStore;
pub use status::ports::StatusClient;
pub use status::StatusService;
