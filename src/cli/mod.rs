//! CLI definition and dispatch

mod delta;
mod report;

use anyhow::Result;
use clap::Parser;
use codesize::overview::OverviewOptions;
use codesize::reporters::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for violations under `--strict`
pub const EXIT_VIOLATIONS: u8 = 1;
/// Exit code for an unusable comparison reference
pub const EXIT_BAD_REF: u8 = 2;

/// Codesize - keep code files small and function names unique
///
/// Without `--compare-to`, prints a full report for the tree. With it, only
/// regressions relative to that git ref are reported.
#[derive(Parser, Debug)]
#[command(name = "codesize")]
#[command(
    version,
    about = "Report oversized files and duplicate function names, or check a branch for regressions",
    after_help = "\
Examples:
  codesize                                   Full report for the current directory
  codesize -d packages/core -n 50            Top 50 files of a subtree
  codesize --compare-to origin/main --strict Fail CI on new regressions
  codesize --format json                     JSON output for scripting"
)]
pub struct Cli {
    /// Warn on files at or over this many lines
    #[arg(short = 't', long, default_value_t = 1000)]
    pub threshold: usize,

    /// Warn on files at or under this many lines
    #[arg(long, default_value_t = 10)]
    pub min_threshold: usize,

    /// Number of longest files to list
    #[arg(short = 'n', long, default_value_t = 20)]
    pub top: usize,

    /// Number of shortest files to list
    #[arg(short = 'b', long, default_value_t = 10)]
    pub bottom: usize,

    /// Directory to scan
    #[arg(short = 'd', long, default_value = ".")]
    pub directory: PathBuf,

    /// Git ref to compare against; only regressions are reported
    #[arg(long, value_name = "REF")]
    pub compare_to: Option<String>,

    /// Exit with code 1 on violations
    #[arg(long)]
    pub strict: bool,

    /// Output format: text, json
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Plain-text markers instead of emoji
    #[arg(long)]
    pub no_emoji: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

impl Cli {
    fn overview_options(&self) -> OverviewOptions {
        OverviewOptions {
            threshold: self.threshold,
            min_threshold: self.min_threshold,
            top: self.top,
            bottom: self.bottom,
        }
    }
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<ExitCode> {
    let format: OutputFormat = cli.format.parse()?;
    match cli.compare_to.as_deref() {
        Some(reference) => delta::run(&cli, reference, format),
        None => report::run(&cli, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["codesize"]).unwrap();
        assert_eq!(cli.threshold, 1000);
        assert_eq!(cli.min_threshold, 10);
        assert_eq!(cli.top, 20);
        assert_eq!(cli.bottom, 10);
        assert_eq!(cli.directory, PathBuf::from("."));
        assert!(cli.compare_to.is_none());
        assert!(!cli.strict);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "codesize", "-t", "500", "-n", "5", "-b", "3", "-d", "src", "--compare-to", "main", "--strict",
        ])
        .unwrap();
        assert_eq!(cli.threshold, 500);
        assert_eq!(cli.top, 5);
        assert_eq!(cli.bottom, 3);
        assert_eq!(cli.directory, PathBuf::from("src"));
        assert_eq!(cli.compare_to.as_deref(), Some("main"));
        assert!(cli.strict);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["codesize", "--format", "sarif"]).is_err());
    }
}
