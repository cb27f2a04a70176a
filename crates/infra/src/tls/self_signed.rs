use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::sync::Arc;

use rcgen::{
    CertificateParams, DistinguishedName, DnType, KeyPair, RsaKeySize, SanType, PKCS_RSA_SHA256,
};
use slack_status_core::TlsMaterialStrategy;
use slack_status_domain::constants::{CERT_FILE, KEY_FILE, SELF_SIGNED_VALIDITY_DAYS};
use slack_status_domain::{Result, SlackStatusError, TlsMaterial, TlsSource};
use tracing::info;

use crate::config::ConfigDir;
use crate::storage::private_file::write_new;

/// Generates a self-signed RSA pair and keeps it in the config directory.
///
/// Existing files are never overwritten; any failure reports
/// `CertificateGeneration` so resolution moves on to the next source.
pub struct SelfSignedPair {
    dir: Arc<ConfigDir>,
    port: u16,
}

impl SelfSignedPair {
    /// `port` ends up in the subject as `CN=localhost:<port>`.
    pub fn new(dir: Arc<ConfigDir>, port: u16) -> Self {
        Self { dir, port }
    }

    fn generate(&self) -> std::result::Result<(String, String), rcgen::Error> {
        let key_pair = KeyPair::generate_rsa_for(&PKCS_RSA_SHA256, RsaKeySize::_2048)?;

        let mut params = CertificateParams::new(vec!["localhost".to_string()])?;
        params.subject_alt_names.push(SanType::IpAddress(IpAddr::V4(Ipv4Addr::LOCALHOST)));

        let mut subject = DistinguishedName::new();
        subject.push(DnType::CommonName, format!("localhost:{}", self.port));
        params.distinguished_name = subject;

        let now = time::OffsetDateTime::now_utc();
        params.not_before = now;
        params.not_after = now + time::Duration::days(SELF_SIGNED_VALIDITY_DAYS);

        let cert = params.self_signed(&key_pair)?;
        Ok((cert.pem(), key_pair.serialize_pem()))
    }

    fn persist(cert_path: &Path, key_path: &Path, cert: &str, key: &str) -> std::io::Result<()> {
        write_new(cert_path, cert.as_bytes())?;
        if let Err(err) = write_new(key_path, key.as_bytes()) {
            // A certificate without its key would block every later run.
            let _ = fs::remove_file(cert_path);
            return Err(err);
        }
        Ok(())
    }
}

impl TlsMaterialStrategy for SelfSignedPair {
    fn name(&self) -> &'static str {
        "self_signed"
    }

    fn resolve(&self) -> Result<Option<TlsMaterial>> {
        let cert_path = self.dir.file_path(CERT_FILE)?;
        let key_path = self.dir.file_path(KEY_FILE)?;

        if cert_path.exists() || key_path.exists() {
            return Err(SlackStatusError::CertificateGeneration(
                "an incomplete certificate pair is already installed".into(),
            ));
        }

        let (cert, key) = self
            .generate()
            .map_err(|err| SlackStatusError::CertificateGeneration(err.to_string()))?;

        Self::persist(&cert_path, &key_path, &cert, &key).map_err(|err| {
            SlackStatusError::CertificateGeneration(format!(
                "could not save generated pair to {}: {err}",
                self.dir.root().display()
            ))
        })?;

        info!(dir = %self.dir.root().display(), port = self.port, "certificates.generated");
        Ok(Some(TlsMaterial {
            cert_pem: cert.into_bytes(),
            key_pem: key.into_bytes(),
            source: TlsSource::Generated,
        }))
    }
}
