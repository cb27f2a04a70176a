//! Authorization code exchange (`oauth.access`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use slack_status_core::{AuthorizationSession, TokenExchanger};
use slack_status_domain::{Result, SlackStatusError};
use tracing::info;

use super::wire::read_envelope;
use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct AccessResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    team_name: Option<String>,
}

const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(15);

/// [`TokenExchanger`] posting to the provider's token endpoint.
pub struct SlackTokenExchanger {
    http: HttpClient,
    token_url: String,
}

impl SlackTokenExchanger {
    /// Authorization codes are single-use, so the exchange is sent exactly
    /// once: its client never retries.
    pub fn new(token_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder().max_attempts(1).timeout(EXCHANGE_TIMEOUT).build()?;
        Ok(Self { http, token_url: token_url.into() })
    }
}

#[async_trait]
impl TokenExchanger for SlackTokenExchanger {
    async fn exchange(&self, session: &AuthorizationSession, code: &str) -> Result<String> {
        let form = [
            ("client_id", session.client_id.as_str()),
            ("client_secret", session.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", session.redirect_uri.as_str()),
        ];
        let request = self.http.request(Method::POST, &self.token_url).form(&form);

        let response = self.http.send(request).await.map_err(|err| {
            SlackStatusError::TokenExchange(format!("token endpoint unreachable: {err}"))
        })?;
        let body = read_envelope::<AccessResponse>(response)
            .await
            .map_err(|err| SlackStatusError::TokenExchange(err.to_string()))?
            .map_err(SlackStatusError::TokenExchange)?;

        let token = body
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SlackStatusError::TokenExchange("response carried no access token".into()))?;

        info!(team = body.team_name.as_deref(), "token_exchange.completed");
        Ok(token)
    }
}
