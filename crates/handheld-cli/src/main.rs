//! Handheld CLI entry point
//!
//! Logs go to stderr so command output on stdout stays parseable.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use handheld_cli::{run, Cli};
use handheld_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("handheld=info".parse()?))
        .init();

    let config = Config::load();
    let mut stdout = io::stdout().lock();
    let ok = run(cli, &config, &mut stdout).await?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
