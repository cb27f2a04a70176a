//! Port interface for the chat service REST API

use async_trait::async_trait;
use slack_status_domain::Result;

/// Calls made against the chat service on behalf of the user
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Workspace domain the token belongs to
    async fn team_domain(&self, token: &str) -> Result<String>;

    /// Set the custom status. `expiration` is Unix seconds, 0 for never.
    async fn set_status(&self, token: &str, text: &str, emoji: &str, expiration: i64)
        -> Result<()>;

    /// Pause notifications for `minutes`
    async fn set_snooze(&self, token: &str, minutes: u64) -> Result<()>;

    /// Resume notifications. Not being snoozed is not an error.
    async fn end_snooze(&self, token: &str) -> Result<()>;
}
