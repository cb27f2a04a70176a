//! Port interfaces for the authorization flow
//!
//! These traits define the boundaries between the flow and the adapters that
//! touch the filesystem, the network and the terminal.

use async_trait::async_trait;
use slack_status_domain::{ListenerTls, Result, TlsMaterial};

use super::flow::AuthorizationSession;

/// One source of TLS material for the callback listener
pub trait TlsMaterialStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// `Ok(None)` when this source has nothing to offer.
    ///
    /// A `CertificateGeneration` error means the source is unavailable and the
    /// next one should be tried; any other error aborts resolution.
    fn resolve(&self) -> Result<Option<TlsMaterial>>;
}

/// Single-request loopback server that captures the authorization code
#[async_trait]
pub trait CallbackListener: Send + Sync {
    /// Serve `path` on `address` until one callback arrives, then shut down.
    async fn listen_for_code(&self, address: &str, path: &str, tls: &ListenerTls)
        -> Result<String>;
}

/// Exchanges an authorization code for an access token
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange(&self, session: &AuthorizationSession, code: &str) -> Result<String>;
}

/// Shows the authorization URL to the operator
pub trait OperatorPrompt: Send + Sync {
    fn present(&self, authorization_url: &str, tls: &ListenerTls);
}
