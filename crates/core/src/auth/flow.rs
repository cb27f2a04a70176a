//! Interactive OAuth authorization-code flow

use std::fmt;
use std::sync::Arc;

use slack_status_domain::{OAuthAppConfig, Result, SlackStatusError};
use tracing::{debug, info};

use super::certificates::CertificateResolver;
use super::ports::{CallbackListener, OperatorPrompt, TokenExchanger};

/// Parameters of one login attempt. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationSession {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub user_scopes: Vec<String>,
    pub listen_address: String,
    pub listen_path: String,
}

impl AuthorizationSession {
    /// Session for `config` with a redirect URI using `scheme`.
    pub fn from_config(config: &OAuthAppConfig, scheme: &str) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri(scheme),
            scopes: config.scopes.clone(),
            user_scopes: config.user_scopes.clone(),
            listen_address: config.listen_address.clone(),
            listen_path: config.listen_path.clone(),
        }
    }
}

impl fmt::Debug for AuthorizationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationSession")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("user_scopes", &self.user_scopes)
            .field("listen_address", &self.listen_address)
            .field("listen_path", &self.listen_path)
            .finish()
    }
}

/// Provider authorization URL for `session`.
///
/// Scope lists are comma separated; every query value is percent-encoded.
pub fn build_authorization_url(authorize_url: &str, session: &AuthorizationSession) -> String {
    format!(
        "{authorize_url}?scope={}&user_scope={}&client_id={}&redirect_uri={}",
        urlencoding::encode(&session.scopes.join(",")),
        urlencoding::encode(&session.user_scopes.join(",")),
        urlencoding::encode(&session.client_id),
        urlencoding::encode(&session.redirect_uri),
    )
}

/// Drives one login: TLS resolution, operator prompt, code capture, exchange.
///
/// Any failure aborts the attempt. Nothing is retried.
pub struct AuthorizationFlow {
    config: OAuthAppConfig,
    certificates: CertificateResolver,
    listener: Arc<dyn CallbackListener>,
    exchanger: Arc<dyn TokenExchanger>,
    prompt: Arc<dyn OperatorPrompt>,
}

impl AuthorizationFlow {
    pub fn new(
        config: OAuthAppConfig,
        certificates: CertificateResolver,
        listener: Arc<dyn CallbackListener>,
        exchanger: Arc<dyn TokenExchanger>,
        prompt: Arc<dyn OperatorPrompt>,
    ) -> Self {
        Self { config, certificates, listener, exchanger, prompt }
    }

    /// Run the flow and return the new access token.
    pub async fn authenticate(&self) -> Result<String> {
        if self.config.client_id.is_empty() {
            return Err(SlackStatusError::Config(
                "no OAuth client id configured, set CLIENT_ID".into(),
            ));
        }

        // The redirect scheme depends on whether TLS material exists.
        let tls = self.certificates.resolve()?;
        let session = AuthorizationSession::from_config(&self.config, tls.scheme());
        debug!(redirect_uri = %session.redirect_uri, "authorization_flow.started");

        let url = build_authorization_url(&self.config.authorize_url, &session);
        self.prompt.present(&url, &tls);

        let code = self
            .listener
            .listen_for_code(&session.listen_address, &session.listen_path, &tls)
            .await?;
        debug!("authorization_flow.code_received");

        let token = self.exchanger.exchange(&session, &code).await?;
        info!("authorization_flow.completed");
        Ok(token)
    }
}
