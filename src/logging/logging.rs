use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use snafu::{ResultExt, Snafu};
use supports_color::Stream;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

use crate::logging::DashFormat;

/// Installs the global subscriber: every record goes to stdout and is appended to `log_file`.
pub fn init(level: Level, log_file: &Path) -> Result<(), LoggingSetupError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .context(OpenLogFileSnafu { path: log_file })?;

    let console_layer = fmt::layer()
        .event_format(DashFormat::default())
        .with_ansi(supports_color::on(Stream::Stdout).is_some())
        .with_writer(std::io::stdout);
    let file_layer = fmt::layer()
        .event_format(DashFormat::default())
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context(InstallSnafu)
}

#[derive(Debug, Snafu)]
pub enum LoggingSetupError {
    #[snafu(display("Failed to open log file {}", path.display()))]
    OpenLogFileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to install the log subscriber"))]
    InstallError { source: TryInitError },
}
