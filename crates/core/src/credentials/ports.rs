//! Port interfaces for credential persistence

use slack_status_domain::{CredentialDocument, Result};

/// Backing storage for the credential document.
///
/// Implementations read and write the whole document at once.
pub trait DocumentStore: Send + Sync {
    /// Load the stored document. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<CredentialDocument>>;

    /// Replace the stored document.
    fn save(&self, document: &CredentialDocument) -> Result<()>;

    /// Bare token written by releases that only supported one workspace.
    fn load_legacy_token(&self) -> Result<Option<String>> {
        Ok(None)
    }
}
