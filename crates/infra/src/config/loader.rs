//! Configuration loader
//!
//! Builds [`AppConfig`] from compiled-in defaults and environment variables.
//!
//! ## Environment Variables
//! - `CLIENT_ID`: OAuth client id (overrides the build-time default)
//! - `CLIENT_SECRET`: OAuth client secret (overrides the build-time default)
//! - `SLACK_STATUS_API_URL`: base URL of the chat service REST API
//!
//! ## Build-time defaults
//! Release builds bake the registered app credentials in through the
//! `SLACK_STATUS_CLIENT_ID` and `SLACK_STATUS_CLIENT_SECRET` variables.

use slack_status_domain::constants::{ENV_API_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET};
use slack_status_domain::{AppConfig, OAuthAppConfig, Result, SlackStatusError};
use url::Url;

const BUILD_CLIENT_ID: Option<&str> = option_env!("SLACK_STATUS_CLIENT_ID");
const BUILD_CLIENT_SECRET: Option<&str> = option_env!("SLACK_STATUS_CLIENT_SECRET");

/// Load configuration from environment variables over the built-in defaults
///
/// # Errors
/// Returns `SlackStatusError::Config` if `SLACK_STATUS_API_URL` is not a
/// valid absolute URL.
pub fn load_from_env() -> Result<AppConfig> {
    let defaults = AppConfig::default();

    let oauth = OAuthAppConfig {
        client_id: env_or(ENV_CLIENT_ID, BUILD_CLIENT_ID.unwrap_or_default()),
        client_secret: env_or(ENV_CLIENT_SECRET, BUILD_CLIENT_SECRET.unwrap_or_default()),
        ..defaults.oauth
    };

    let api_base_url = match env_value(ENV_API_URL) {
        Some(raw) => parse_base_url(&raw)?,
        None => defaults.api_base_url,
    };

    tracing::debug!(
        client_id_set = !oauth.client_id.is_empty(),
        client_secret_set = !oauth.client_secret.is_empty(),
        %api_base_url,
        "config.loaded"
    );

    Ok(AppConfig { oauth, api_base_url })
}

fn parse_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw)
        .map_err(|e| SlackStatusError::Config(format!("Invalid {ENV_API_URL} {raw:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SlackStatusError::Config(format!(
            "Invalid {ENV_API_URL}: unsupported scheme {}",
            url.scheme()
        )));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Non-empty environment variable value
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Environment variable value, or `default` when unset or empty
fn env_or(key: &str, default: &str) -> String {
    env_value(key).unwrap_or_else(|| default.to_string())
}
