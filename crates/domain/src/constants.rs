//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

use std::time::Duration;

// Configuration directory layout
pub const CONFIG_APP_DIR: &str = "slack-status-cli";
pub const CREDENTIALS_FILE: &str = "config.json";
pub const LEGACY_TOKEN_FILE: &str = "token";
pub const CERT_FILE: &str = "cert.pem";
pub const KEY_FILE: &str = "key.pem";

// OAuth callback listener
pub const DEFAULT_LISTEN_ADDRESS: &str = "localhost:8888";
pub const DEFAULT_LISTEN_PATH: &str = "/auth";
pub const CALLBACK_READ_TIMEOUT: Duration = Duration::from_secs(5);
pub const CALLBACK_WRITE_TIMEOUT: Duration = Duration::from_secs(10);
pub const CALLBACK_IDLE_TIMEOUT: Duration = Duration::from_secs(120);

// Self-signed certificates
pub const SELF_SIGNED_VALIDITY_DAYS: i64 = 365;

// Chat service endpoints
pub const SLACK_AUTHORIZE_URL: &str = "https://slack.com/oauth/authorize";
pub const SLACK_TOKEN_URL: &str = "https://slack.com/api/oauth.access";
pub const SLACK_API_BASE_URL: &str = "https://slack.com/api";

/// Scopes requested for both the bot and the user token.
pub const DEFAULT_SCOPES: [&str; 3] = ["dnd:write", "users.profile:write", "team:read"];

// Environment variables
pub const ENV_CLIENT_ID: &str = "CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const ENV_API_URL: &str = "SLACK_STATUS_API_URL";
