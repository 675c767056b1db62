mod actions;
mod cli;
mod commands;
mod config;
mod logging;
mod paths;
mod session_file;
mod table;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::commands::Context;
use crate::config::Overrides;
use crate::config::Settings;
use crate::session_file::SessionFile;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref(), &Overrides::from(&cli))?;
    if let Err(err) = logging::init(settings.log_level) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let ctx = Context::new(settings, SessionFile::default_location()).await?;
    let result = commands::dispatch(&ctx, cli.command).await;

    // A 401 clears the session in memory; mirror that on disk even on failure.
    ctx.persist_session().await?;
    result
}

/// Prints library errors as their user-facing messages, anything else with
/// its context chain.
fn report(err: &anyhow::Error) {
    log::error!("{err:#}");
    match err.downcast_ref::<contracts_lib::error::Error>() {
        Some(lib_err) => {
            if err.chain().count() > 1 {
                eprintln!("error: {err}");
            }
            for message in lib_err.user_messages() {
                eprintln!("error: {message}");
            }
            if lib_err.is_unauthorized() {
                eprintln!("Run `contracts login <username>` to sign in again.");
            }
        }
        None => eprintln!("error: {err:#}"),
    }
}
