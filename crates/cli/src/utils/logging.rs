use std::time::Duration;

use slack_status_domain::SlackStatusError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log the outcome of a command with structured fields.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&SlackStatusError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => {
            warn!(command, duration_ms, error_type = error_label(err), "command_execution_failure");
        }
    }
}

/// Stable label for an error, safe to log.
#[inline]
pub const fn error_label(error: &SlackStatusError) -> &'static str {
    match error {
        SlackStatusError::UnknownDomain(_) => "unknown_domain",
        SlackStatusError::ConfigIo(_) => "config_io",
        SlackStatusError::ListenerBind(_) => "listener_bind",
        SlackStatusError::MissingAuthorizationCode => "missing_authorization_code",
        SlackStatusError::CallbackTimeout(_) => "callback_timeout",
        SlackStatusError::TokenExchange(_) => "token_exchange",
        SlackStatusError::CertificateGeneration(_) => "certificate_generation",
        SlackStatusError::Config(_) => "config",
        SlackStatusError::Network(_) => "network",
        SlackStatusError::Api(_) => "api",
        SlackStatusError::InvalidInput(_) => "invalid_input",
        SlackStatusError::Internal(_) => "internal",
    }
}
