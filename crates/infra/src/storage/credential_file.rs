//! JSON credential document on disk

use std::sync::Arc;

use slack_status_core::DocumentStore;
use slack_status_domain::constants::{CREDENTIALS_FILE, LEGACY_TOKEN_FILE};
use slack_status_domain::{CredentialDocument, Result, SlackStatusError};
use tracing::debug;

use super::private_file::{read_optional, write_atomic};
use crate::config::paths::PathContext;
use crate::config::ConfigDir;
use crate::errors::InfraError;

/// `config.json` in the configuration directory, plus the legacy `token` file.
pub struct JsonCredentialFile {
    dir: Arc<ConfigDir>,
}

impl JsonCredentialFile {
    pub fn new(dir: Arc<ConfigDir>) -> Self {
        Self { dir }
    }
}

fn io_error(err: std::io::Error, path: &std::path::Path) -> SlackStatusError {
    SlackStatusError::from(InfraError::from(err)).with_context(path)
}

impl DocumentStore for JsonCredentialFile {
    fn load(&self) -> Result<Option<CredentialDocument>> {
        let path = self.dir.file_path(CREDENTIALS_FILE)?;
        let Some(bytes) = read_optional(&path).map_err(|err| io_error(err, &path))? else {
            return Ok(None);
        };

        // An empty file holds no logins yet.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let document = serde_json::from_slice(&bytes)
            .map_err(|err| SlackStatusError::from(InfraError::from(err)).with_context(&path))?;
        Ok(Some(document))
    }

    fn save(&self, document: &CredentialDocument) -> Result<()> {
        let path = self.dir.file_path(CREDENTIALS_FILE)?;
        let contents = serde_json::to_vec_pretty(document).map_err(InfraError::from)?;

        write_atomic(&path, &contents).map_err(|err| io_error(err, &path))?;
        debug!(path = %path.display(), domains = document.domain_tokens.len(), "credential_file.written");
        Ok(())
    }

    fn load_legacy_token(&self) -> Result<Option<String>> {
        let path = self.dir.file_path(LEGACY_TOKEN_FILE)?;
        let Some(bytes) = read_optional(&path).map_err(|err| io_error(err, &path))? else {
            return Ok(None);
        };

        let token = String::from_utf8_lossy(&bytes).trim().to_string();
        Ok((!token.is_empty()).then_some(token))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn file_in(temp: &TempDir) -> JsonCredentialFile {
        JsonCredentialFile::new(Arc::new(ConfigDir::with_roots(temp.path(), None)))
    }

    #[test]
    fn missing_file_loads_as_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(file_in(&temp).load().unwrap(), None);
    }

    #[test]
    fn round_trips_document() {
        let temp = TempDir::new().unwrap();
        let file = file_in(&temp);

        for tokens in [
            HashMap::new(),
            HashMap::from([("acme".to_string(), "xoxp-1".to_string())]),
            HashMap::from([
                ("acme".to_string(), "xoxp-1".to_string()),
                ("globex".to_string(), "xoxp-2".to_string()),
                ("initech".to_string(), "xoxp-3".to_string()),
            ]),
        ] {
            let default_domain = tokens.keys().min().cloned().unwrap_or_default();
            let document = CredentialDocument { default_domain, domain_tokens: tokens };

            file.save(&document).unwrap();
            assert_eq!(file.load().unwrap(), Some(document));
        }
    }

    #[test]
    fn writes_stable_field_names() {
        let temp = TempDir::new().unwrap();
        let file = file_in(&temp);
        let document = CredentialDocument {
            default_domain: "acme".into(),
            domain_tokens: HashMap::from([("acme".to_string(), "xoxp-1".to_string())]),
        };
        file.save(&document).unwrap();

        let raw = fs::read_to_string(temp.path().join(CREDENTIALS_FILE)).unwrap();
        assert!(raw.contains("\"DefaultDomain\""));
        assert!(raw.contains("\"DomainTokens\""));
    }

    #[test]
    fn reads_document_written_by_older_releases() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CREDENTIALS_FILE),
            r#"{"DefaultDomain":"acme","DomainTokens":{"acme":"xoxp-1"}}"#,
        )
        .unwrap();

        let document = file_in(&temp).load().unwrap().unwrap();
        assert_eq!(document.default_token(), Some("xoxp-1"));
    }

    #[test]
    fn malformed_file_is_config_io_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CREDENTIALS_FILE), "{not json").unwrap();

        match file_in(&temp).load() {
            Err(SlackStatusError::ConfigIo(msg)) => assert!(msg.contains(CREDENTIALS_FILE)),
            other => panic!("expected config io error, got {other:?}"),
        }
    }

    #[test]
    fn legacy_token_is_trimmed() {
        let temp = TempDir::new().unwrap();
        let file = file_in(&temp);
        assert_eq!(file.load_legacy_token().unwrap(), None);

        fs::write(temp.path().join(LEGACY_TOKEN_FILE), "  \n").unwrap();
        assert_eq!(file.load_legacy_token().unwrap(), None);

        fs::write(temp.path().join(LEGACY_TOKEN_FILE), "xoxp-legacy\n").unwrap();
        assert_eq!(file.load_legacy_token().unwrap().as_deref(), Some("xoxp-legacy"));
    }
}
