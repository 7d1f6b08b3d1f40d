//! Diagnostic output gated by `-q` / `-v`.
//!
//! Quiet prints errors only. Default adds warnings and the completion line.
//! Verbose adds table counts and per-stage timings.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// Output verbosity level, ordered from least to most output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Default = 1,
    Verbose = 2,
}

impl Verbosity {
    /// Level selected by the CLI flags. `quiet` wins if both are set.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Default,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Quiet,
            2 => Self::Verbose,
            _ => Self::Default,
        }
    }
}

static LEVEL: AtomicU8 = AtomicU8::new(Verbosity::Default as u8);

/// Set the process-wide level. Called once from `main`.
pub fn init(quiet: bool, verbose: bool) {
    LEVEL.store(Verbosity::from_flags(quiet, verbose) as u8, Ordering::Relaxed);
}

/// Returns `true` if output at `level` should be shown.
pub fn enabled(level: Verbosity) -> bool {
    Verbosity::from_u8(LEVEL.load(Ordering::Relaxed)) >= level
}

/// `println!` shown only with `-v`.
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::enabled($crate::verbose::Verbosity::Verbose) {
            println!($($arg)*);
        }
    };
}

pub(crate) use vprintln;

/// `println!` suppressed by `-q`.
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::enabled($crate::verbose::Verbosity::Default) {
            println!($($arg)*);
        }
    };
}

pub(crate) use dprintln;

/// Warning on stderr, suppressed by `-q`.
macro_rules! dwarn {
    ($($arg:tt)*) => {
        if $crate::verbose::enabled($crate::verbose::Verbosity::Default) {
            eprintln!("warning: {}", format_args!($($arg)*));
        }
    };
}

pub(crate) use dwarn;

/// Prints how long a pipeline stage took when dropped, in verbose mode.
pub struct Timer {
    stage: &'static str,
    start: Instant,
}

impl Timer {
    /// Start timing `stage`.
    pub fn start(stage: &'static str) -> Self {
        Self {
            stage,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if enabled(Verbosity::Verbose) {
            println!("  {}: {:.1?}", self.stage, self.start.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Default);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(Verbosity::Verbose > Verbosity::Default);
        assert!(Verbosity::Default > Verbosity::Quiet);
    }
}
