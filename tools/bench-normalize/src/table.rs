//! Reading and grouping of raw benchmark results.
//!
//! Input is a tab-separated table with a header row. Rows are grouped by
//! the parallelism configuration `(dp, tp, tpsp, fsdp)`; both the groups
//! and the tests inside each group keep their first-seen order.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::NormalizeError;
use crate::ordered::OrderedMap;

/// Placeholder for absent configuration fields and absent measurements.
pub const NA: &str = "NA";

/// Columns every input table is expected to carry.
pub const REQUIRED_COLUMNS: [&str; 7] = ["test", "dp", "tp", "tpsp", "fsdp", "mean", "stddev"];

/// Parallelism configuration identifying a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    /// Data parallelism.
    pub dp: String,
    /// Tensor parallelism.
    pub tp: String,
    /// Tensor/sequence parallelism.
    pub tpsp: String,
    /// Fully-sharded data parallelism.
    pub fsdp: String,
}

impl ConfigKey {
    /// Build a key, substituting [`NA`] for missing or empty fields.
    pub fn new(dp: Option<&str>, tp: Option<&str>, tpsp: Option<&str>, fsdp: Option<&str>) -> Self {
        Self {
            dp: or_na(dp),
            tp: or_na(tp),
            tpsp: or_na(tpsp),
            fsdp: or_na(fsdp),
        }
    }
}

fn or_na(field: Option<&str>) -> String {
    match field {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => NA.to_owned(),
    }
}

/// One benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Test name; unique within its group.
    pub test: String,
    /// Mean as written in the input.
    pub mean: String,
    /// Standard deviation as written in the input.
    pub stddev: String,
}

/// All records sharing one [`ConfigKey`].
#[derive(Debug, Clone)]
pub struct Group {
    /// Configuration shared by every record.
    pub key: ConfigKey,
    /// Records keyed by test name, in first-seen order.
    pub records: OrderedMap<String, Record>,
}

impl Group {
    fn new(key: ConfigKey) -> Self {
        Self {
            key,
            records: OrderedMap::new(),
        }
    }

    /// Look up a record by test name.
    pub fn get(&self, test: &str) -> Option<&Record> {
        self.records.get(test)
    }
}

/// A single input row with absent cells left as `None`.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    /// `test` cell.
    pub test: Option<String>,
    /// `dp` cell.
    pub dp: Option<String>,
    /// `tp` cell.
    pub tp: Option<String>,
    /// `tpsp` cell.
    pub tpsp: Option<String>,
    /// `fsdp` cell.
    pub fsdp: Option<String>,
    /// `mean` cell.
    pub mean: Option<String>,
    /// `stddev` cell.
    pub stddev: Option<String>,
}

/// Header positions of the columns we read. Absent columns are `None`.
struct Columns {
    test: Option<usize>,
    dp: Option<usize>,
    tp: Option<usize>,
    tpsp: Option<usize>,
    fsdp: Option<usize>,
    mean: Option<usize>,
    stddev: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Self {
        // Duplicate header names resolve to the last occurrence.
        let find = |name: &str| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| *h == name)
                .map(|(i, _)| i)
                .last()
        };
        Self {
            test: find("test"),
            dp: find("dp"),
            tp: find("tp"),
            tpsp: find("tpsp"),
            fsdp: find("fsdp"),
            mean: find("mean"),
            stddev: find("stddev"),
        }
    }

    fn extract(&self, record: &csv::StringRecord) -> RawRow {
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::to_owned);
        RawRow {
            test: cell(self.test),
            dp: cell(self.dp),
            tp: cell(self.tp),
            tpsp: cell(self.tpsp),
            fsdp: cell(self.fsdp),
            mean: cell(self.mean),
            stddev: cell(self.stddev),
        }
    }
}

/// Grouped benchmark results.
#[derive(Debug, Clone, Default)]
pub struct Table {
    groups: OrderedMap<ConfigKey, Group>,
    skipped: usize,
    missing_columns: Vec<&'static str>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tab-separated text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, NormalizeError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = Columns::resolve(&headers);

        let mut table = Self::new();
        table.missing_columns = REQUIRED_COLUMNS
            .into_iter()
            .filter(|name| !headers.iter().any(|h| h == *name))
            .collect();

        for result in rdr.records() {
            let record = result?;
            table.insert(columns.extract(&record));
        }
        Ok(table)
    }

    /// Add one row. Rows without a test name are counted and dropped.
    ///
    /// A repeated `(key, test)` pair replaces the earlier record's values
    /// but keeps its position.
    pub fn insert(&mut self, row: RawRow) {
        let key = ConfigKey::new(
            row.dp.as_deref(),
            row.tp.as_deref(),
            row.tpsp.as_deref(),
            row.fsdp.as_deref(),
        );
        let test = match row.test {
            Some(test) if !test.is_empty() => test,
            _ => {
                self.skipped += 1;
                return;
            }
        };
        let record = Record {
            test: test.clone(),
            mean: row.mean.unwrap_or_else(|| NA.to_owned()),
            stddev: row.stddev.unwrap_or_else(|| NA.to_owned()),
        };
        self.groups
            .get_or_insert_with(key.clone(), || Group::new(key))
            .records
            .insert(test, record);
    }

    /// Groups in first-seen order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Number of distinct configurations.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of records across all groups.
    pub fn len(&self) -> usize {
        self.groups().map(|g| g.records.len()).sum()
    }

    /// Returns `true` if no record was kept.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Rows dropped for having no test name.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Required columns absent from the header.
    pub fn missing_columns(&self) -> &[&'static str] {
        &self.missing_columns
    }
}

/// Read and group the table at `path`.
pub fn read_table(path: &Path) -> Result<Table, NormalizeError> {
    let file = File::open(path).map_err(|e| NormalizeError::io(path, e))?;
    Table::from_reader(BufReader::new(file))
}
