use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use fellow_db::error::DatabaseError;
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("fellow error: {error:#}");
            ExitCode::from(exit_code(&error))
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config(&flags)?;

    let ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize fellow application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

/// `FELLOW_LOG` wins over the level implied by `--quiet`/`--verbose`.
fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let fallback = match (quiet, verbose) {
        (true, _) => "error",
        (false, true) => "debug",
        (false, false) => "warn",
    };
    let filter = EnvFilter::try_from_env("FELLOW_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

/// Distinct exit statuses for the relationship error classes; anything else is 1.
fn exit_code(error: &anyhow::Error) -> u8 {
    let Some(db_error) = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<DatabaseError>())
    else {
        return 1;
    };
    if db_error.is_invalid_request() {
        2
    } else if db_error.is_not_found() {
        3
    } else if db_error.is_forbidden() {
        4
    } else if db_error.is_invalid_state() {
        5
    } else if db_error.is_unavailable() {
        75
    } else {
        1
    }
}
