//! Token acquisition policy: explicit token, stored credential, or a new login

use std::sync::Arc;

use slack_status_domain::Result;
use tracing::{info, warn};

use super::flow::AuthorizationFlow;
use crate::credentials::CredentialStore;
use crate::status::ports::StatusClient;

/// How the caller wants a token to be obtained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginOptions {
    /// Token given on the command line. Verified and stored.
    pub access_token: Option<String>,
    /// Workspace domain to use instead of the default.
    pub domain: Option<String>,
    /// Run the authorization flow even if a token is stored.
    pub force_login: bool,
    /// Make the domain of the token in use the default.
    pub make_default: bool,
}

pub struct LoginService {
    credentials: Arc<CredentialStore>,
    flow: Arc<AuthorizationFlow>,
    status: Arc<dyn StatusClient>,
}

impl LoginService {
    pub fn new(
        credentials: Arc<CredentialStore>,
        flow: Arc<AuthorizationFlow>,
        status: Arc<dyn StatusClient>,
    ) -> Self {
        Self { credentials, flow, status }
    }

    /// Return a usable access token, logging in only when needed.
    pub async fn acquire_token(&self, options: &LoginOptions) -> Result<String> {
        if let Some(token) = options.access_token.as_deref().filter(|token| !token.is_empty()) {
            self.remember(token, options).await?;
            return Ok(token.to_string());
        }

        if !options.force_login {
            match self.stored_token(options.domain.as_deref()) {
                Ok(token) => {
                    if let (true, Some(domain)) = (options.make_default, options.domain.as_deref())
                    {
                        self.credentials.save_default_login(domain)?;
                    }
                    return Ok(token);
                }
                Err(err) if err.suggests_login() => {
                    info!(reason = %err, "login.no_stored_credential");
                }
                Err(err) => return Err(err),
            }
        }

        let token = self.flow.authenticate().await?;
        self.remember(&token, options).await?;
        Ok(token)
    }

    fn stored_token(&self, domain: Option<&str>) -> Result<String> {
        match domain {
            Some(domain) => self.credentials.get_token(domain),
            None => self.credentials.default_token_with_legacy_fallback(),
        }
    }

    /// Save `token` under the workspace domain the chat service reports for it.
    async fn remember(&self, token: &str, options: &LoginOptions) -> Result<()> {
        let domain = self.status.team_domain(token).await?;

        if let Some(requested) = options.domain.as_deref().filter(|requested| *requested != domain)
        {
            warn!(requested, actual = %domain, "login.domain_mismatch");
        }

        self.credentials.save_login(&domain, token)?;
        if options.make_default {
            self.credentials.save_default_login(&domain)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use slack_status_domain::{OAuthAppConfig, SlackStatusError};

    use super::*;
    use crate::auth::CertificateResolver;
    use crate::testing::{MemoryStore, RecordingStatusClient, StubExchanger, StubListener};

    struct Harness {
        service: LoginService,
        credentials: Arc<CredentialStore>,
        listener: Arc<StubListener>,
    }

    fn harness(memory: MemoryStore, team: &str) -> Harness {
        let credentials = Arc::new(CredentialStore::new(Arc::new(memory)));
        let listener = Arc::new(StubListener::returning("code-1"));
        let flow = Arc::new(AuthorizationFlow::new(
            OAuthAppConfig { client_id: "id".into(), ..OAuthAppConfig::default() },
            CertificateResolver::new(Vec::new()),
            listener.clone(),
            Arc::new(StubExchanger),
            Arc::new(crate::testing::SilentPrompt),
        ));
        let status = Arc::new(RecordingStatusClient::with_team(team));
        let service = LoginService::new(credentials.clone(), flow, status);
        Harness { service, credentials, listener }
    }

    #[tokio::test]
    async fn explicit_token_is_saved_under_team_domain() {
        let h = harness(MemoryStore::default(), "acme");
        let options = LoginOptions { access_token: Some("xoxp-given".into()), ..Default::default() };

        let token = h.service.acquire_token(&options).await.unwrap();

        assert_eq!(token, "xoxp-given");
        assert_eq!(h.credentials.get_token("acme").unwrap(), "xoxp-given");
        assert_eq!(h.listener.calls(), 0);
    }

    #[tokio::test]
    async fn stored_default_token_avoids_login() {
        let h = harness(MemoryStore::default(), "acme");
        h.credentials.save_login("acme", "xoxp-stored").unwrap();

        let token = h.service.acquire_token(&LoginOptions::default()).await.unwrap();

        assert_eq!(token, "xoxp-stored");
        assert_eq!(h.listener.calls(), 0);
    }

    #[tokio::test]
    async fn missing_credential_runs_flow_and_saves() {
        let h = harness(MemoryStore::default(), "acme");

        let token = h.service.acquire_token(&LoginOptions::default()).await.unwrap();

        assert_eq!(token, "xoxp-code-1");
        assert_eq!(h.listener.calls(), 1);
        assert_eq!(h.credentials.get_default_token().unwrap(), "xoxp-code-1");
    }

    #[tokio::test]
    async fn unknown_domain_triggers_login() {
        let h = harness(MemoryStore::default(), "globex");
        h.credentials.save_login("acme", "xoxp-acme").unwrap();
        let options = LoginOptions { domain: Some("globex".into()), ..Default::default() };

        let token = h.service.acquire_token(&options).await.unwrap();

        assert_eq!(token, "xoxp-code-1");
        assert_eq!(h.credentials.get_token("globex").unwrap(), "xoxp-code-1");
        assert_eq!(h.credentials.read_all().unwrap().default_domain, "acme");
    }

    #[tokio::test]
    async fn forced_login_with_make_default() {
        let h = harness(MemoryStore::default(), "globex");
        h.credentials.save_login("acme", "xoxp-acme").unwrap();
        let options = LoginOptions { force_login: true, make_default: true, ..Default::default() };

        h.service.acquire_token(&options).await.unwrap();

        assert_eq!(h.listener.calls(), 1);
        assert_eq!(h.credentials.get_default_token().unwrap(), "xoxp-code-1");
    }

    #[tokio::test]
    async fn make_default_repoints_stored_domain() {
        let h = harness(MemoryStore::default(), "acme");
        h.credentials.save_login("acme", "xoxp-acme").unwrap();
        h.credentials.save_login("globex", "xoxp-globex").unwrap();
        let options = LoginOptions {
            domain: Some("globex".into()),
            make_default: true,
            ..Default::default()
        };

        h.service.acquire_token(&options).await.unwrap();

        assert_eq!(h.credentials.get_default_token().unwrap(), "xoxp-globex");
        assert_eq!(h.listener.calls(), 0);
    }

    #[tokio::test]
    async fn corrupt_store_is_not_masked_by_login() {
        let h = harness(MemoryStore::failing_load(), "acme");

        let err = h.service.acquire_token(&LoginOptions::default()).await.unwrap_err();

        assert!(matches!(err, SlackStatusError::ConfigIo(_)));
        assert_eq!(h.listener.calls(), 0);
    }
}
