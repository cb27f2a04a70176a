use std::sync::Arc;

use slack_status_core::TlsMaterialStrategy;
use slack_status_domain::constants::{CERT_FILE, KEY_FILE};
use slack_status_domain::{Result, SlackStatusError, TlsMaterial, TlsSource};

use crate::config::paths::PathContext;
use crate::config::ConfigDir;
use crate::errors::InfraError;
use crate::storage::private_file::read_optional;

/// `cert.pem` and `key.pem` already present in the config directory.
///
/// The pair is used as-is; a bad pair surfaces when the listener starts.
pub struct InstalledPair {
    dir: Arc<ConfigDir>,
}

impl InstalledPair {
    pub fn new(dir: Arc<ConfigDir>) -> Self {
        Self { dir }
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.dir.file_path(name)?;
        let bytes = read_optional(&path)
            .map_err(|err| SlackStatusError::from(InfraError::from(err)).with_context(&path))?;
        Ok(bytes.filter(|bytes| !bytes.is_empty()))
    }
}

impl TlsMaterialStrategy for InstalledPair {
    fn name(&self) -> &'static str {
        "installed"
    }

    fn resolve(&self) -> Result<Option<TlsMaterial>> {
        let (Some(cert_pem), Some(key_pem)) = (self.read(CERT_FILE)?, self.read(KEY_FILE)?) else {
            return Ok(None);
        };

        Ok(Some(TlsMaterial { cert_pem, key_pem, source: TlsSource::Installed }))
    }
}
