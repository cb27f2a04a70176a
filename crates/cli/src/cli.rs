//! Command line definition

use std::time::Duration;

use clap::Parser;
use slack_status_core::LoginOptions;
use slack_status_domain::utils::status_args::parse_duration_literal;
use slack_status_domain::{parse_status_args, StatusRequest};

/// Set your Slack status, optionally snoozing notifications.
///
/// A duration and an emoji can also be given in the status text itself:
/// `slack-status 5m :coffee: Getting coffee` or
/// `slack-status :dancing: Dancing for 1h`. Running without any text clears
/// the status.
#[derive(Debug, Default, Parser)]
#[command(name = "slack-status", version, about, long_about = None)]
pub struct Cli {
    /// Snooze notifications for the duration of the status
    #[arg(long)]
    pub snooze: bool,

    /// How long the status should last, e.g. 30m or 1h30m
    #[arg(long, value_parser = parse_duration_flag)]
    pub duration: Option<Duration>,

    /// Emoji to use as the status, e.g. :coffee:
    #[arg(long)]
    pub emoji: Option<String>,

    /// Use this access token instead of a stored login; it is saved for later
    #[arg(long, env = "SLACK_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Workspace domain to act on instead of the default one
    #[arg(long)]
    pub domain: Option<String>,

    /// Log in again even if a token is stored
    #[arg(long)]
    pub login: bool,

    /// Make the workspace used by this run the default
    #[arg(long)]
    pub make_default: bool,

    /// Show debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Status text, optionally starting with a duration and/or an emoji
    #[arg(trailing_var_arg = true)]
    pub status: Vec<String>,
}

impl Cli {
    pub fn status_request(&self) -> StatusRequest {
        parse_status_args(&self.status, self.duration, self.emoji.clone(), self.snooze)
    }

    pub fn login_options(&self) -> LoginOptions {
        LoginOptions {
            access_token: self.access_token.clone(),
            domain: self.domain.clone(),
            force_login: self.login,
            make_default: self.make_default,
        }
    }

    /// Only manage logins, leaving the current status untouched.
    pub fn is_login_only(&self) -> bool {
        (self.login || self.make_default)
            && self.status.is_empty()
            && self.duration.is_none()
            && self.emoji.is_none()
            && !self.snooze
    }
}

fn parse_duration_flag(raw: &str) -> Result<Duration, String> {
    parse_duration_literal(raw).ok_or_else(|| format!("invalid duration {raw:?}, try 30m or 1h30m"))
}
