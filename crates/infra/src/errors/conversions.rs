//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use slack_status_domain::SlackStatusError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SlackStatusError);

impl From<InfraError> for SlackStatusError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SlackStatusError> for InfraError {
    fn from(value: SlackStatusError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSlackStatusError {
    fn into_slack_status(self) -> SlackStatusError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → SlackStatusError */
/* -------------------------------------------------------------------------- */

impl IntoSlackStatusError for IoError {
    fn into_slack_status(self) -> SlackStatusError {
        match self.kind() {
            ErrorKind::PermissionDenied => {
                SlackStatusError::ConfigIo(format!("permission denied: {self}"))
            }
            ErrorKind::NotFound => SlackStatusError::ConfigIo(format!("not found: {self}")),
            _ => SlackStatusError::ConfigIo(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_slack_status())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → SlackStatusError */
/* -------------------------------------------------------------------------- */

impl IntoSlackStatusError for JsonError {
    fn into_slack_status(self) -> SlackStatusError {
        if self.is_io() {
            return SlackStatusError::ConfigIo(self.to_string());
        }
        SlackStatusError::ConfigIo(format!(
            "malformed JSON at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_slack_status())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SlackStatusError */
/* -------------------------------------------------------------------------- */

impl IntoSlackStatusError for HttpError {
    fn into_slack_status(self) -> SlackStatusError {
        if self.is_timeout() {
            return SlackStatusError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return SlackStatusError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return SlackStatusError::Api(format!("unexpected response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                400..=499 if code != 429 => SlackStatusError::Api(message),
                _ => SlackStatusError::Network(message),
            };
        }

        SlackStatusError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_slack_status())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use tokio::runtime::Runtime;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn io_permission_denied_maps_to_config_io() {
        let err = IoError::new(ErrorKind::PermissionDenied, "config.json");
        let mapped: SlackStatusError = InfraError::from(err).into();
        match mapped {
            SlackStatusError::ConfigIo(msg) => assert!(msg.contains("permission denied")),
            other => panic!("expected config io error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_json_reports_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"DefaultDomain\": ").unwrap_err();
        let mapped: SlackStatusError = InfraError::from(err).into();
        match mapped {
            SlackStatusError::ConfigIo(msg) => assert!(msg.contains("line 2")),
            other => panic!("expected config io error, got {:?}", other),
        }
    }

    #[test]
    fn http_status_403_maps_to_api_error() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(StatusCode::FORBIDDEN))
                .mount(&server)
                .await;

            let client = Client::builder().no_proxy().build().unwrap();
            let error =
                client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

            let mapped: SlackStatusError = InfraError::from(error).into();
            match mapped {
                SlackStatusError::Api(msg) => assert!(msg.contains("403")),
                other => panic!("expected api error, got {:?}", other),
            }
        });
    }

    #[test]
    fn http_status_429_is_a_network_error() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(StatusCode::TOO_MANY_REQUESTS))
                .mount(&server)
                .await;

            let client = Client::builder().no_proxy().build().unwrap();
            let error =
                client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

            let mapped: SlackStatusError = InfraError::from(error).into();
            assert!(matches!(mapped, SlackStatusError::Network(_)));
        });
    }
}
