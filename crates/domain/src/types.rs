//! Common data types used throughout the application

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Persisted credential document: one access token per workspace domain plus
/// the domain used when none is given on the command line.
///
/// Field names are part of the on-disk format and must not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialDocument {
    #[serde(default)]
    pub default_domain: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domain_tokens: HashMap<String, String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CredentialDocument {
    /// Token stored for `domain`, if any.
    #[must_use]
    pub fn token_for(&self, domain: &str) -> Option<&str> {
        self.domain_tokens.get(domain).map(String::as_str)
    }

    /// Token for the default domain. Unset default means no token.
    #[must_use]
    pub fn default_token(&self) -> Option<&str> {
        if self.default_domain.is_empty() {
            return None;
        }
        self.token_for(&self.default_domain)
    }

    /// A non-empty default domain must also be a key of the token mapping.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.default_domain.is_empty() || self.domain_tokens.contains_key(&self.default_domain)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain_tokens.is_empty()
    }
}

/// Where a piece of TLS material came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsSource {
    /// `cert.pem` / `key.pem` already present in the config directory.
    Installed,
    /// Self-signed pair generated during this run.
    Generated,
    /// Pair compiled into the binary.
    Embedded,
}

impl fmt::Display for TlsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed => write!(f, "installed"),
            Self::Generated => write!(f, "generated"),
            Self::Embedded => write!(f, "embedded"),
        }
    }
}

/// PEM encoded certificate and private key.
#[derive(Clone, PartialEq, Eq)]
pub struct TlsMaterial {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
    pub source: TlsSource,
}

// Keep key bytes out of logs.
impl fmt::Debug for TlsMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsMaterial")
            .field("cert_len", &self.cert_pem.len())
            .field("key_len", &self.key_pem.len())
            .field("source", &self.source)
            .finish()
    }
}

/// Transport the callback listener should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerTls {
    Tls(TlsMaterial),
    /// No usable material: serve plain HTTP on loopback.
    Plaintext,
}

impl ListenerTls {
    /// URL scheme matching this transport.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        match self {
            Self::Tls(_) => "https",
            Self::Plaintext => "http",
        }
    }
}

/// Status change parsed from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRequest {
    pub duration: Option<Duration>,
    pub emoji: Option<String>,
    pub status_text: String,
    pub snooze: bool,
}

impl StatusRequest {
    /// Epoch seconds at which the status should expire, 0 for never.
    #[must_use]
    pub fn expiration_timestamp(&self, now: DateTime<Utc>) -> i64 {
        match self.duration {
            Some(duration) if !duration.is_zero() => {
                let secs = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
                now.timestamp().saturating_add(secs)
            }
            _ => 0,
        }
    }

    /// Whole minutes of the duration, as used for snoozing notifications.
    #[must_use]
    pub fn duration_minutes(&self) -> u64 {
        self.duration.map_or(0, |duration| duration.as_secs() / 60)
    }
}
