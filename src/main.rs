#![allow(clippy::enum_variant_names)]

use clap::Parser as _;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    application::{Application, ApplicationError, LoggingSnafu},
    cli::Cli,
};

mod application;
mod cli;
mod filesystem;
mod logging;
mod reconciler;
mod scheduler;

#[compio::main]
#[snafu::report]
async fn main() -> Result<(), ApplicationError> {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args)?;
    debug!("Parsed CLI arguments: {cli_args:?}");

    Application::run(cli_args).await?;

    Ok(())
}

fn setup_tracing(cli_args: &Cli) -> Result<(), ApplicationError> {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        logging::init(level, &cli_args.log_file).context(LoggingSnafu)?;
    }
    Ok(())
}
