//! Application context - dependency injection container

use std::sync::Arc;

use slack_status_core::{
    AuthorizationFlow, CallbackListener, CertificateResolver, CredentialStore, LoginService,
    OperatorPrompt, StatusClient, StatusService, TlsMaterialStrategy, TokenExchanger,
};
use slack_status_domain::{AppConfig, Result};
use slack_status_infra::{
    ConfigDir, EmbeddedPair, HttpClient, InstalledPair, JsonCredentialFile,
    LoopbackCallbackListener, SelfSignedPair, SlackApiClient, SlackTokenExchanger,
};
use tracing::debug;

use crate::prompt::ConsolePrompt;

/// Port used for generated certificates when the listen address has none.
const FALLBACK_LISTEN_PORT: u16 = 8888;

/// Services shared by the commands, wired once at start-up.
pub struct AppContext {
    pub config: AppConfig,
    pub config_dir: Arc<ConfigDir>,
    pub credentials: Arc<CredentialStore>,
    pub login: Arc<LoginService>,
    pub status: Arc<StatusService>,
}

impl AppContext {
    /// Wire the production adapters under the user's config directory.
    ///
    /// # Errors
    /// Fails when no config directory can be determined or the HTTP client
    /// cannot be built.
    pub fn new(config: AppConfig) -> Result<Self> {
        let config_dir = Arc::new(ConfigDir::resolve()?);
        Self::with_config_dir(config, config_dir)
    }

    /// Same as [`AppContext::new`] with an explicit config directory.
    pub fn with_config_dir(config: AppConfig, config_dir: Arc<ConfigDir>) -> Result<Self> {
        let credentials =
            Arc::new(CredentialStore::new(Arc::new(JsonCredentialFile::new(config_dir.clone()))));

        let port = config.oauth.listen_port().unwrap_or(FALLBACK_LISTEN_PORT);
        let strategies: Vec<Arc<dyn TlsMaterialStrategy>> = vec![
            Arc::new(InstalledPair::new(config_dir.clone())),
            Arc::new(SelfSignedPair::new(config_dir.clone(), port)),
            Arc::new(EmbeddedPair),
        ];
        let certificates = CertificateResolver::new(strategies);

        let listener: Arc<dyn CallbackListener> =
            Arc::new(LoopbackCallbackListener::new(config.oauth.timeouts));
        let exchanger: Arc<dyn TokenExchanger> =
            Arc::new(SlackTokenExchanger::new(config.oauth.token_url.clone())?);
        let prompt: Arc<dyn OperatorPrompt> = Arc::new(ConsolePrompt);
        let status_client: Arc<dyn StatusClient> =
            Arc::new(SlackApiClient::new(HttpClient::new()?, config.api_base_url.clone()));

        let flow = Arc::new(AuthorizationFlow::new(
            config.oauth.clone(),
            certificates,
            listener,
            exchanger,
            prompt,
        ));
        let login = Arc::new(LoginService::new(credentials.clone(), flow, status_client.clone()));
        let status = Arc::new(StatusService::new(status_client));

        debug!(
            config_dir = %config_dir.root().display(),
            listen_address = %config.oauth.listen_address,
            "context.initialized"
        );

        Ok(Self { config, config_dir, credentials, login, status })
    }
}
