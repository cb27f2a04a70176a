use slack_status_core::TlsMaterialStrategy;
use slack_status_domain::{Result, TlsMaterial, TlsSource};

const CERT_PEM: &[u8] = include_bytes!("../../certs/cert.pem");
const KEY_PEM: &[u8] = include_bytes!("../../certs/key.pem");

/// Pair compiled into the binary, identical for every installation.
///
/// Only acceptable because the listener is loopback-only.
#[derive(Debug, Default)]
pub struct EmbeddedPair;

impl TlsMaterialStrategy for EmbeddedPair {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn resolve(&self) -> Result<Option<TlsMaterial>> {
        if CERT_PEM.is_empty() || KEY_PEM.is_empty() {
            return Ok(None);
        }

        Ok(Some(TlsMaterial {
            cert_pem: CERT_PEM.to_vec(),
            key_pem: KEY_PEM.to_vec(),
            source: TlsSource::Embedded,
        }))
    }
}
