//! Ordered fallback chain of TLS material sources

use std::sync::Arc;

use slack_status_domain::{ListenerTls, Result, SlackStatusError};
use tracing::{debug, info, warn};

use super::ports::TlsMaterialStrategy;

/// Picks TLS material for the callback listener.
///
/// Strategies are tried in order and the first one returning material wins.
/// Sources that report `CertificateGeneration` are skipped. When no source
/// yields material the listener runs in plaintext.
pub struct CertificateResolver {
    strategies: Vec<Arc<dyn TlsMaterialStrategy>>,
}

impl CertificateResolver {
    pub fn new(strategies: Vec<Arc<dyn TlsMaterialStrategy>>) -> Self {
        Self { strategies }
    }

    /// Append a strategy after the existing ones
    #[must_use]
    pub fn with_strategy(mut self, strategy: Arc<dyn TlsMaterialStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn resolve(&self) -> Result<ListenerTls> {
        for strategy in &self.strategies {
            match strategy.resolve() {
                Ok(Some(material)) => {
                    info!(strategy = strategy.name(), source = %material.source, "certificates.resolved");
                    return Ok(ListenerTls::Tls(material));
                }
                Ok(None) => debug!(strategy = strategy.name(), "certificates.unavailable"),
                Err(SlackStatusError::CertificateGeneration(reason)) => {
                    warn!(strategy = strategy.name(), %reason, "certificates.strategy_failed");
                }
                Err(err) => return Err(err),
            }
        }

        warn!("certificates.plaintext_fallback");
        Ok(ListenerTls::Plaintext)
    }
}
