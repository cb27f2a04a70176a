//! Status service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use slack_status_domain::{Result, StatusRequest};
use tracing::info;

use super::ports::StatusClient;

pub struct StatusService {
    client: Arc<dyn StatusClient>,
}

impl StatusService {
    pub fn new(client: Arc<dyn StatusClient>) -> Self {
        Self { client }
    }

    /// Set the status, then snooze or un-snooze notifications to match.
    pub async fn apply(&self, token: &str, request: &StatusRequest, now: DateTime<Utc>) -> Result<()> {
        let expiration = request.expiration_timestamp(now);
        let emoji = request.emoji.as_deref().unwrap_or_default();

        self.client.set_status(token, &request.status_text, emoji, expiration).await?;
        info!(expiration, emoji, "status.updated");

        if request.snooze {
            let minutes = request.duration_minutes();
            self.client.set_snooze(token, minutes).await?;
            info!(minutes, "status.snoozed");
        } else {
            self.client.end_snooze(token).await?;
        }

        Ok(())
    }
}
