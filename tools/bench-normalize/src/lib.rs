//! Baseline normalization of grouped benchmark results.
//!
//! Pipeline: read TSV → group by `(dp, tp, tpsp, fsdp)` → normalize each
//! group against its baseline test → append CSV or TSV summary.

pub mod config;
pub mod error;
pub mod normalize;
pub mod ordered;
pub mod table;
pub mod writer;

pub use config::NormalizeConfig;
pub use error::NormalizeError;
pub use normalize::{DEFAULT_BASELINE, Normalized, OutputRow, normalize_table};
pub use table::{Table, read_table};
pub use writer::{OutputFormat, write_rows};
