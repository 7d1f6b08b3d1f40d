//! Summary output in comma- or tab-separated form.
//!
//! Output files are always opened for append: repeated runs accumulate a
//! header and a block of rows per run.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::NormalizeError;
use crate::normalize::{HEADER, OutputRow};

/// Output serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated with minimal quoting.
    Csv,
    /// Tab-joined, selected by `txt`.
    Txt,
    /// Tab-joined, selected by `tsv`.
    Tsv,
}

impl OutputFormat {
    /// Token naming this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
            Self::Tsv => "tsv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "txt" => Ok(Self::Txt),
            "tsv" => Ok(Self::Tsv),
            _ => Err(NormalizeError::Format(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write the header and `rows` as CSV.
pub fn write_csv<W: Write>(out: W, rows: &[OutputRow]) -> Result<(), NormalizeError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row.fields())?;
    }
    wtr.flush().map_err(|e| NormalizeError::Csv(e.into()))?;
    Ok(())
}

/// Write the header and `rows` joined by tabs, one line each.
pub fn write_tsv<W: Write>(mut out: W, rows: &[OutputRow]) -> std::io::Result<()> {
    writeln!(out, "{}", HEADER.join("\t"))?;
    for row in rows {
        writeln!(out, "{}", row.fields().join("\t"))?;
    }
    out.flush()
}

/// Append the summary to `path`, creating the file if needed.
pub fn write_rows(path: &Path, format: OutputFormat, rows: &[OutputRow]) -> Result<(), NormalizeError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| NormalizeError::io(path, e))?;
    let out = BufWriter::new(file);

    match format {
        OutputFormat::Csv => write_csv(out, rows),
        OutputFormat::Txt | OutputFormat::Tsv => {
            write_tsv(out, rows).map_err(|e| NormalizeError::io(path, e))
        }
    }
}
