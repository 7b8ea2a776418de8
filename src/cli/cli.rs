use std::num::NonZeroU64;
use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::reconciler::CompareMode;

/// Keep a replica directory an exact copy of a source directory.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Directory to mirror from
    pub source: PathBuf,
    /// Directory to mirror into; created when missing
    pub replica: PathBuf,
    /// Seconds to wait between the end of one pass and the start of the next
    pub interval: u64,
    /// File every record is appended to, in addition to stdout
    pub log_file: PathBuf,

    #[clap(long, short, default_value = "info", value_enum)]
    pub log_level: LogLevel,

    /// How files present on both sides are judged identical
    #[clap(long, short, default_value = "content", value_enum)]
    pub compare: CompareMode,

    /// Stop after this many passes instead of running until killed
    #[clap(long)]
    pub passes: Option<NonZeroU64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["dirmirror", "./src", "./replica", "10", "./sync.log"])
            .expect("Failed to parse arguments");

        assert_eq!(cli.source, PathBuf::from("./src"));
        assert_eq!(cli.replica, PathBuf::from("./replica"));
        assert_eq!(cli.interval, 10);
        assert_eq!(cli.log_file, PathBuf::from("./sync.log"));
        assert!(matches!(cli.log_level, LogLevel::Info));
        assert_eq!(cli.compare, CompareMode::Content);
        assert_eq!(cli.passes, None);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "dirmirror",
            "a",
            "b",
            "0",
            "c.log",
            "--log-level",
            "debug",
            "--compare",
            "metadata",
            "--passes",
            "3",
        ])
        .expect("Failed to parse arguments");

        assert_eq!(cli.interval, 0);
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert_eq!(cli.compare, CompareMode::Metadata);
        assert_eq!(cli.passes, NonZeroU64::new(3));
    }

    #[rstest]
    #[case(&["dirmirror", "a", "b", "10"])]
    #[case(&["dirmirror", "a", "b", "-5", "c.log"])]
    #[case(&["dirmirror", "a", "b", "ten", "c.log"])]
    #[case(&["dirmirror", "a", "b", "10", "c.log", "--passes", "0"])]
    #[case(&["dirmirror", "a", "b", "10", "c.log", "--compare", "mtime"])]
    fn test_rejected_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
