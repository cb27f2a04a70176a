//! slack-status - set your Slack status from the terminal

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use slack_status_cli::utils::logging::init_tracing;
use slack_status_cli::{commands, AppContext, Cli};
use slack_status_domain::SlackStatusError;
use slack_status_infra::load_from_env;

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` must be loaded before parsing so `env =` flags can read it
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "env.loaded"),
        Err(err) if err.not_found() => tracing::debug!("env.no_dotenv_file"),
        Err(err) => tracing::warn!(error = %err, "env.load_failed"),
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let needs_login = err
                .downcast_ref::<SlackStatusError>()
                .is_some_and(SlackStatusError::suggests_login);
            if needs_login {
                eprintln!("Run `slack-status --login` to authenticate.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_from_env().context("failed to load configuration")?;
    let ctx = AppContext::new(config).context("failed to initialize")?;
    commands::run(&ctx, cli).await?;
    Ok(())
}
