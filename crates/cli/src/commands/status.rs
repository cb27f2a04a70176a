//! Set (or clear) the status, then snooze or resume notifications

use chrono::Utc;
use slack_status_domain::Result;
use tracing::info;

use crate::{AppContext, Cli};

/// Apply the status described by the command line.
///
/// Empty status text with no emoji clears the current status.
pub async fn set_status(ctx: &AppContext, cli: &Cli) -> Result<()> {
    let request = cli.status_request();
    let token = ctx.login.acquire_token(&cli.login_options()).await?;

    ctx.status.apply(&token, &request, Utc::now()).await?;

    info!(
        cleared = request.status_text.is_empty() && request.emoji.is_none(),
        snooze = request.snooze,
        duration_secs = request.duration.map_or(0, |d| d.as_secs()),
        "status.updated"
    );
    Ok(())
}
