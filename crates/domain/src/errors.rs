//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for slack-status
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlackStatusError {
    /// The requested (or default) domain has no stored token.
    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    #[error("Config I/O error: {0}")]
    ConfigIo(String),

    #[error("Failed to start callback listener: {0}")]
    ListenerBind(String),

    #[error("no oauth code found in callback request")]
    MissingAuthorizationCode,

    #[error("Timed out after {0}s waiting for the OAuth callback")]
    CallbackTimeout(u64),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Certificate generation failed: {0}")]
    CertificateGeneration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The chat service answered with `ok: false`.
    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SlackStatusError {
    /// Whether re-running the login flow is the likely fix.
    #[must_use]
    pub const fn suggests_login(&self) -> bool {
        matches!(self, Self::UnknownDomain(_))
    }
}

/// Result type alias for slack-status operations
pub type Result<T> = std::result::Result<T, SlackStatusError>;
