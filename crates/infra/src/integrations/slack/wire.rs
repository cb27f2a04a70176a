//! Response envelope shared by every Slack Web API method

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use slack_status_domain::{Result, SlackStatusError};

use crate::errors::InfraError;

/// `{"ok": bool, "error": "..."}`, present on every reply.
#[derive(Debug, Deserialize)]
struct Header {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Method without interesting response fields.
#[derive(Debug, Deserialize)]
pub(super) struct Empty {}

/// Read a reply: the method body when `ok` is true, else the API error code.
///
/// The body is only decoded for successful replies, since error replies
/// carry none of the method-specific fields.
pub(super) async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<std::result::Result<T, String>> {
    let response = response.error_for_status().map_err(InfraError::from)?;
    let value: Value = response.json().await.map_err(InfraError::from)?;
    decode_envelope(value)
}

fn decode_envelope<T: DeserializeOwned>(value: Value) -> Result<std::result::Result<T, String>> {
    let header = Header::deserialize(&value).map_err(unexpected_body)?;
    if !header.ok {
        return Ok(Err(header.error.unwrap_or_else(|| "unknown_error".to_string())));
    }
    T::deserialize(value).map(Ok).map_err(unexpected_body)
}

fn unexpected_body(err: serde_json::Error) -> SlackStatusError {
    SlackStatusError::Api(format!("unexpected response body: {err}"))
}
