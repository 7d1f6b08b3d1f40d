//! Error types for the normalizer.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while reading, normalizing, or writing results.
///
/// Non-numeric `mean` values are not errors; they degrade to `"-"` in the
/// normalized column.
#[derive(Debug)]
pub enum NormalizeError {
    /// Fewer than three positional arguments were given.
    Usage,
    /// The output format token is not `csv`, `txt`, or `tsv`.
    Format(String),
    /// A file could not be opened, read, or written.
    Io {
        /// Path of the file involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Malformed delimited input or a failed record write.
    Csv(csv::Error),
    /// The configuration file is unreadable or invalid.
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

impl NormalizeError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Format(_) => 2,
            _ => 1,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "missing arguments"),
            Self::Format(token) => write!(f, "invalid format type '{token}'"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Csv(e) => write!(f, "delimited data error: {e}"),
            Self::Config { path, message } => {
                write!(f, "config {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for NormalizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for NormalizeError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}
