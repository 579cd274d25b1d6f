mod args;
mod command;
mod shell;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use shell::Shell;
use std::process;
use tracing_subscriber::EnvFilter;
use userdb_core::service::UserService;

fn main() {
    if let Err(err) = run() {
        eprintln!("userdb: error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.db_config();
    tracing::debug!(write_mode = ?config.write_mode, "starting shell");

    let service = UserService::new(config)
        .map_err(|err| anyhow::anyhow!(err.display_with_class()))
        .context("could not open the user store")?;

    Shell::new(service, args.compact).run()
}
