//! Log in (or repoint the default workspace) without touching the status

use slack_status_core::LoginOptions;
use slack_status_domain::Result;
use tracing::info;

use crate::AppContext;

/// Acquire a token according to `options` and report the default workspace.
pub async fn login(ctx: &AppContext, options: &LoginOptions) -> Result<()> {
    ctx.login.acquire_token(options).await?;

    let document = ctx.credentials.read_all()?;
    info!(
        domains = document.domain_tokens.len(),
        default_domain = %document.default_domain,
        "login.completed"
    );
    println!("Logged in. Default workspace: {}", document.default_domain);
    Ok(())
}
