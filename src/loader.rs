//! Tab-delimited source table loading.
//!
//! Rows are split on a single tab with no quoting or escaping. A row whose
//! field count differs from the table width is handled according to the
//! configured [`RowPolicy`], uniformly for every table of a run. Blank
//! lines carry no row and are skipped under either policy.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TableError};
use crate::record::{DecompositionRecord, EncodingRecord};

/// Columns of the encoding table: character, full code, full rank, short code, short rank.
pub const ENCODING_FIELDS: usize = 5;
/// Columns of the decomposition table: character, sequence.
pub const DECOMPOSITION_FIELDS: usize = 2;

/// Handling of rows whose column count is not the expected table width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Pad missing trailing fields with empty strings and drop extra ones.
    #[default]
    Fill,
    /// Abort the run with [`TableError::MalformedRow`].
    Strict,
}

/// Rows loaded from one source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<T> {
    pub rows: Vec<T>,
    /// Rows that were padded or truncated under [`RowPolicy::Fill`].
    pub filled: usize,
}

fn reader_for<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(rdr)
}

fn read_rows<R, T, F>(
    rdr: R,
    source: &Path,
    width: usize,
    policy: RowPolicy,
    build: F,
) -> Result<Table<T>>
where
    R: Read,
    F: Fn(Vec<String>) -> T,
{
    let mut reader = reader_for(rdr);
    let mut rows = Vec::new();
    let mut filled = 0usize;
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let found = record.len();
        if found != width {
            match policy {
                RowPolicy::Strict => {
                    return Err(TableError::MalformedRow {
                        path: source.to_path_buf(),
                        line,
                        expected: width,
                        found,
                    })
                }
                RowPolicy::Fill => {
                    warn!(
                        path = %source.display(),
                        line,
                        expected = width,
                        found,
                        "filling malformed row with empty fields"
                    );
                    filled += 1;
                }
            }
        }
        let mut fields: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        fields.resize(width, String::new());
        rows.push(build(fields));
    }
    Ok(Table { rows, filled })
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| TableError::MissingInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse encoding rows from any reader. `source` only labels errors and logs.
pub fn read_encoding_table<R: Read>(
    rdr: R,
    source: &Path,
    policy: RowPolicy,
) -> Result<Table<EncodingRecord>> {
    read_rows(rdr, source, ENCODING_FIELDS, policy, |f| {
        let mut it = f.into_iter();
        let mut next = || it.next().unwrap_or_default();
        EncodingRecord {
            character: next(),
            full_code: next(),
            full_rank: next(),
            short_code: next(),
            short_rank: next(),
        }
    })
}

/// Parse decomposition rows from any reader.
pub fn read_decomposition_table<R: Read>(
    rdr: R,
    source: &Path,
    policy: RowPolicy,
) -> Result<Table<DecompositionRecord>> {
    read_rows(rdr, source, DECOMPOSITION_FIELDS, policy, |f| {
        let mut it = f.into_iter();
        let character = it.next().unwrap_or_default();
        let sequence = it.next().unwrap_or_default();
        DecompositionRecord { character, sequence }
    })
}

/// Load the encoding table at `path`, preserving row order.
pub fn load_encoding_table(path: &Path, policy: RowPolicy) -> Result<Table<EncodingRecord>> {
    let file = open_input(path)?;
    read_encoding_table(file, path, policy)
}

/// Load the decomposition table at `path`, preserving row order.
pub fn load_decomposition_table(
    path: &Path,
    policy: RowPolicy,
) -> Result<Table<DecompositionRecord>> {
    let file = open_input(path)?;
    read_decomposition_table(file, path, policy)
}
