//! Benchmark result normalizer.
//!
//! Reads a TSV of benchmark runs, normalizes each run against the baseline
//! test of its parallelism configuration, and appends the summary as CSV or
//! TSV.
//!
//! Exit codes: 0 success, 1 missing arguments or I/O failure, 2 invalid
//! format.

mod cli;
mod verbose;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bench_normalize::{
    NormalizeConfig, NormalizeError, OutputFormat, normalize_table, read_table, write_rows,
};
use clap::Parser;
use clap::error::ErrorKind;

use verbose::{Timer, dprintln, dwarn, vprintln};

fn main() -> ExitCode {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return ExitCode::from(report_parse_error(&err)),
    };
    verbose::init(cli.quiet, cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report(&err)),
    }
}

/// Handle a clap rejection. Help and version exit 0; anything else is a
/// usage error.
fn report_parse_error(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        _ => {
            eprint!("{}", err.render());
            print!("{}", cli::USAGE);
            NormalizeError::Usage.exit_code()
        }
    }
}

/// Print `err` the way its kind calls for and return the exit code.
fn report(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<NormalizeError>() {
        Some(NormalizeError::Usage) => {
            print!("{}", cli::USAGE);
            1
        }
        Some(e @ NormalizeError::Format(_)) => {
            println!("Invalid format type! Use 'csv' or 'txt'/'tsv'.");
            e.exit_code()
        }
        other => {
            eprintln!("error: {err:#}");
            other.map_or(1, NormalizeError::exit_code)
        }
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    let (Some(input), Some(output), Some(format)) = (&cli.input, &cli.output, &cli.format) else {
        return Err(NormalizeError::Usage.into());
    };
    // Checked before reading so a bad token never touches the output.
    let format: OutputFormat = format.parse()?;

    let config = match &cli.config {
        Some(path) => NormalizeConfig::load(path)?,
        None => NormalizeConfig::default(),
    };
    let baseline = config.baseline(cli.baseline.as_deref());
    vprintln!("Baseline test: {baseline}");

    normalize_file(input, output, format, baseline)?;

    dprintln!("Done. Wrote summary to {} as {format}.", output.display());
    Ok(())
}

/// Read, normalize, and append one summary.
fn normalize_file(input: &Path, output: &Path, format: OutputFormat, baseline: &str) -> Result<()> {
    let table = {
        let _t = Timer::start("read");
        read_table(input).with_context(|| format!("reading {}", input.display()))?
    };
    if table.is_empty() {
        dwarn!("{} contains no benchmark rows", input.display());
    }
    for column in table.missing_columns() {
        dwarn!("{} has no '{column}' column; treating its cells as missing", input.display());
    }
    vprintln!(
        "Read {} records in {} configurations ({} rows without a test name skipped)",
        table.len(),
        table.group_count(),
        table.skipped()
    );

    let normalized = {
        let _t = Timer::start("normalize");
        normalize_table(&table, baseline)
    };
    if normalized.groups_without_baseline > 0 {
        vprintln!(
            "{} of {} configurations have no usable '{baseline}' baseline",
            normalized.groups_without_baseline,
            normalized.groups
        );
    }

    let _t = Timer::start("write");
    write_rows(output, format, &normalized.rows)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}
