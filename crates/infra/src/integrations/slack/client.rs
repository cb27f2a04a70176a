//! Minimal Slack Web API client for status and do-not-disturb calls

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use slack_status_core::StatusClient;
use slack_status_domain::{Result, SlackStatusError};
use tracing::debug;

use super::wire::{read_envelope, Empty};
use crate::http::HttpClient;

/// `dnd.endSnooze` reports this when notifications were not paused.
const SNOOZE_NOT_ACTIVE: &str = "snooze_not_active";

#[derive(Debug, Deserialize)]
struct TeamInfo {
    team: Team,
}

#[derive(Debug, Deserialize)]
struct Team {
    domain: String,
}

/// [`StatusClient`] over the Slack Web API.
pub struct SlackApiClient {
    http: HttpClient,
    base_url: String,
}

impl SlackApiClient {
    /// `base_url` is the API root, e.g. `https://slack.com/api`.
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    fn method_url(&self, api_method: &str) -> String {
        format!("{}/{api_method}", self.base_url)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        api_method: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<std::result::Result<T, String>> {
        let response = self.http.send(request).await?;
        let outcome = read_envelope::<T>(response).await?;
        debug!(api_method, ok = outcome.is_ok(), "slack_api.called");
        Ok(outcome)
    }
}

fn api_error(api_method: &str, code: String) -> SlackStatusError {
    SlackStatusError::Api(format!("{api_method}: {code}"))
}

#[async_trait]
impl StatusClient for SlackApiClient {
    async fn team_domain(&self, token: &str) -> Result<String> {
        let request = self.http.request(Method::GET, self.method_url("team.info")).bearer_auth(token);
        let info: TeamInfo =
            self.call("team.info", request).await?.map_err(|code| api_error("team.info", code))?;
        Ok(info.team.domain)
    }

    async fn set_status(&self, token: &str, text: &str, emoji: &str, expiration: i64) -> Result<()> {
        let body = json!({
            "profile": {
                "status_text": text,
                "status_emoji": emoji,
                "status_expiration": expiration,
            }
        });
        let request = self
            .http
            .request(Method::POST, self.method_url("users.profile.set"))
            .bearer_auth(token)
            .json(&body);

        self.call::<Empty>("users.profile.set", request)
            .await?
            .map_err(|code| api_error("users.profile.set", code))?;
        Ok(())
    }

    async fn set_snooze(&self, token: &str, minutes: u64) -> Result<()> {
        let request = self
            .http
            .request(Method::POST, self.method_url("dnd.setSnooze"))
            .bearer_auth(token)
            .form(&[("num_minutes", minutes.to_string())]);

        self.call::<Empty>("dnd.setSnooze", request)
            .await?
            .map_err(|code| api_error("dnd.setSnooze", code))?;
        Ok(())
    }

    async fn end_snooze(&self, token: &str) -> Result<()> {
        let request =
            self.http.request(Method::POST, self.method_url("dnd.endSnooze")).bearer_auth(token);

        match self.call::<Empty>("dnd.endSnooze", request).await? {
            Ok(_) => Ok(()),
            Err(code) if code == SNOOZE_NOT_ACTIVE => Ok(()),
            Err(code) => Err(api_error("dnd.endSnooze", code)),
        }
    }
}
