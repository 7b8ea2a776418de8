use std::num::NonZeroU64;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::reconciler::CompareMode;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub source: PathBuf,
    pub replica: PathBuf,
    pub interval: Duration,
    pub compare: CompareMode,
    pub passes: Option<NonZeroU64>,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            source: cli.source,
            replica: cli.replica,
            interval: Duration::from_secs(cli.interval),
            compare: cli.compare,
            passes: cli.passes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "dirmirror",
            "src",
            "dst",
            "7",
            "sync.log",
            "--passes",
            "2",
        ])
        .expect("Failed to parse arguments");

        let config = RuntimeConfig::from(cli);

        assert_eq!(config.source, PathBuf::from("src"));
        assert_eq!(config.replica, PathBuf::from("dst"));
        assert_eq!(config.interval, Duration::from_secs(7));
        assert_eq!(config.compare, CompareMode::Content);
        assert_eq!(config.passes.map(NonZeroU64::get), Some(2));
    }
}
