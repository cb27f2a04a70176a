//! Credential store service - default-domain rules over a document store

use std::sync::Arc;

use slack_status_domain::{CredentialDocument, Result, SlackStatusError};
use tracing::{debug, info};

use super::ports::DocumentStore;

const DEFAULT_DOMAIN_UNSET: &str = "no default domain set";

/// One access token per workspace domain plus a default domain.
///
/// Every mutation is a read-modify-write of the whole document. There is no
/// locking between processes; the last writer wins.
pub struct CredentialStore {
    store: Arc<dyn DocumentStore>,
}

impl CredentialStore {
    /// Create a credential store over the given backing storage
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Read the whole document, empty when nothing has been stored yet.
    ///
    /// A document whose default domain has no token is rejected.
    pub fn read_all(&self) -> Result<CredentialDocument> {
        let document = self.store.load()?.unwrap_or_default();

        if !document.is_consistent() {
            return Err(SlackStatusError::ConfigIo(format!(
                "default domain {:?} has no stored token",
                document.default_domain
            )));
        }

        Ok(document)
    }

    /// Token stored for `domain`.
    pub fn get_token(&self, domain: &str) -> Result<String> {
        self.read_all()?
            .token_for(domain)
            .map(str::to_string)
            .ok_or_else(|| SlackStatusError::UnknownDomain(domain.to_string()))
    }

    /// Token stored for the default domain.
    pub fn get_default_token(&self) -> Result<String> {
        let document = self.read_all()?;
        Self::default_token_of(&document)
    }

    /// Like [`Self::get_default_token`], but falls back to the legacy bare
    /// token file when the document holds no tokens at all.
    pub fn default_token_with_legacy_fallback(&self) -> Result<String> {
        let document = self.read_all()?;

        if document.is_empty() {
            if let Some(token) = self.store.load_legacy_token()? {
                debug!("credential_store.legacy_token_used");
                return Ok(token);
            }
        }

        Self::default_token_of(&document)
    }

    /// Store `token` for `domain`. The first domain ever saved becomes the
    /// default.
    pub fn save_login(&self, domain: &str, token: &str) -> Result<()> {
        if domain.is_empty() {
            return Err(SlackStatusError::InvalidInput("domain must not be empty".into()));
        }

        let mut document = self.read_all()?;
        let first_login = document.is_empty();

        document.domain_tokens.insert(domain.to_string(), token.to_string());
        if first_login {
            document.default_domain = domain.to_string();
        }

        self.store.save(&document)?;
        info!(domain, made_default = first_login, "credential_store.saved");
        Ok(())
    }

    /// Point the default at `domain`, which must already have a token.
    pub fn save_default_login(&self, domain: &str) -> Result<()> {
        let mut document = self.read_all()?;

        if !document.domain_tokens.contains_key(domain) {
            return Err(SlackStatusError::UnknownDomain(domain.to_string()));
        }

        document.default_domain = domain.to_string();
        self.store.save(&document)?;
        info!(domain, "credential_store.default_changed");
        Ok(())
    }

    fn default_token_of(document: &CredentialDocument) -> Result<String> {
        if document.default_domain.is_empty() {
            return Err(SlackStatusError::UnknownDomain(DEFAULT_DOMAIN_UNSET.into()));
        }

        document
            .default_token()
            .map(str::to_string)
            .ok_or_else(|| SlackStatusError::UnknownDomain(document.default_domain.clone()))
    }
}
