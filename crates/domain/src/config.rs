//! Configuration management

use std::fmt;
use std::time::Duration;

use crate::constants::{
    CALLBACK_IDLE_TIMEOUT, CALLBACK_READ_TIMEOUT, CALLBACK_WRITE_TIMEOUT, DEFAULT_LISTEN_ADDRESS,
    DEFAULT_LISTEN_PATH, DEFAULT_SCOPES, SLACK_API_BASE_URL, SLACK_AUTHORIZE_URL, SLACK_TOKEN_URL,
};

/// Application configuration, resolved once at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub oauth: OAuthAppConfig,
    pub api_base_url: String,
}

/// OAuth application registration and callback listener settings.
#[derive(Clone)]
pub struct OAuthAppConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    pub user_scopes: Vec<String>,
    /// `host:port` the callback listener binds to.
    pub listen_address: String,
    pub listen_path: String,
    pub authorize_url: String,
    pub token_url: String,
    pub timeouts: ListenerTimeouts,
}

impl OAuthAppConfig {
    /// Redirect URI registered with the provider for the given scheme.
    #[must_use]
    pub fn redirect_uri(&self, scheme: &str) -> String {
        format!("{scheme}://{}{}", self.listen_address, self.listen_path)
    }

    /// Port component of the listen address, if it has one.
    #[must_use]
    pub fn listen_port(&self) -> Option<u16> {
        self.listen_address.rsplit_once(':').and_then(|(_, port)| port.parse().ok())
    }
}

impl fmt::Debug for OAuthAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthAppConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("user_scopes", &self.user_scopes)
            .field("listen_address", &self.listen_address)
            .field("listen_path", &self.listen_path)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

/// Transport timeouts of the callback listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerTimeouts {
    pub read: Duration,
    pub write: Duration,
    /// Upper bound on how long the listener waits for the callback.
    pub idle: Duration,
}

impl Default for ListenerTimeouts {
    fn default() -> Self {
        Self { read: CALLBACK_READ_TIMEOUT, write: CALLBACK_WRITE_TIMEOUT, idle: CALLBACK_IDLE_TIMEOUT }
    }
}

impl Default for OAuthAppConfig {
    fn default() -> Self {
        let scopes: Vec<String> = DEFAULT_SCOPES.iter().map(ToString::to_string).collect();
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_scopes: scopes.clone(),
            scopes,
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            listen_path: DEFAULT_LISTEN_PATH.to_string(),
            authorize_url: SLACK_AUTHORIZE_URL.to_string(),
            token_url: SLACK_TOKEN_URL.to_string(),
            timeouts: ListenerTimeouts::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { oauth: OAuthAppConfig::default(), api_base_url: SLACK_API_BASE_URL.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_uri_follows_scheme() {
        let config = OAuthAppConfig::default();
        assert_eq!(config.redirect_uri("https"), "https://localhost:8888/auth");
        assert_eq!(config.redirect_uri("http"), "http://localhost:8888/auth");
        assert_eq!(config.listen_port(), Some(8888));
    }

    #[test]
    fn debug_redacts_secret() {
        let config =
            OAuthAppConfig { client_secret: "hunter2".into(), ..OAuthAppConfig::default() };
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
