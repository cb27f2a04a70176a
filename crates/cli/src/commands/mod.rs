//! Command implementations

pub mod login;
pub mod status;

use std::time::Instant;

use slack_status_domain::Result;

use crate::utils::logging::log_command_execution;
use crate::{AppContext, Cli};

/// Run whichever command the arguments ask for.
pub async fn run(ctx: &AppContext, cli: &Cli) -> Result<()> {
    let started = Instant::now();
    let (command, result) = if cli.is_login_only() {
        ("login", login::login(ctx, &cli.login_options()).await)
    } else {
        ("set_status", status::set_status(ctx, cli).await)
    };

    log_command_execution(command, started.elapsed(), result.as_ref().err());
    result
}
