//! Command-line interface definitions for normalize.

use clap::Parser;
use std::path::PathBuf;

/// Usage text printed when positional arguments are missing.
pub const USAGE: &str = "\
Usage: normalize input_raw_results.tsv output_summary.{csv|txt} format
  format = 'csv' for comma-separated, 'txt' or 'tsv' for tab-separated
  use '--' before paths that start with '-'
";

/// Normalize benchmark results against a baseline test per configuration.
///
/// Positional arguments are optional at the parser level so that a short
/// argument list maps to the usage exit code rather than clap's. Paths
/// starting with `-` must follow a `--` separator.
#[derive(Parser)]
#[command(name = "normalize", version, about)]
pub struct Cli {
    /// Tab-separated raw results with a header row.
    pub input: Option<PathBuf>,

    /// Summary file; appended to if it already exists.
    pub output: Option<PathBuf>,

    /// Output format: `csv`, `txt`, or `tsv` (case-insensitive).
    pub format: Option<String>,

    /// Ignored trailing arguments.
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Baseline test name (overrides the config file).
    #[arg(long, short = 'b')]
    pub baseline: Option<String>,

    /// TOML configuration file.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Suppress warnings and the completion message.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print per-stage counts and timings.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn missing_positionals_still_parse() {
        let cli = Cli::try_parse_from(["normalize", "in.tsv"]).unwrap();
        assert!(cli.output.is_none());
        assert!(cli.format.is_none());
    }

    #[test]
    fn flags_and_positionals() {
        let cli =
            Cli::try_parse_from(["normalize", "-v", "-b", "ref", "in.tsv", "out.csv", "CSV"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.baseline.as_deref(), Some("ref"));
        assert_eq!(cli.format.as_deref(), Some("CSV"));
    }

    #[test]
    fn separator_allows_hyphen_paths() {
        let cli = Cli::try_parse_from(["normalize", "--", "-raw.tsv", "out.csv", "csv"]).unwrap();
        assert_eq!(cli.input.as_deref(), Some(std::path::Path::new("-raw.tsv")));
    }

    #[test]
    fn unknown_flag_is_rejected_by_parser() {
        let err = Cli::try_parse_from(["normalize", "--bogus", "a", "b", "csv"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
