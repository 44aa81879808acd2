//! Schema-validated tabular datasets.
//!
//! A [`Dataset`] is an immutable, ordered sequence of [`Row`]s sharing one
//! column list. The column list is fixed when the dataset is built, either from
//! the keys of the first record or from a CSV header, and every row stores
//! exactly one cell per column. A new upload produces a new `Dataset`; nothing
//! mutates one in place.
//!
//! # Example
//!
//! ```rust
//! use dataset_profiler::dataset::Dataset;
//!
//! let dataset = Dataset::from_records(vec![
//!     vec![("a", Some("1")), ("b", Some("x"))],
//!     vec![("b", Some("y")), ("a", Some("2"))],
//! ])
//! .unwrap();
//!
//! assert_eq!(dataset.columns(), &["a".to_string(), "b".to_string()]);
//! assert_eq!(dataset.value(1, "a"), Some("2"));
//! ```

mod csv;

pub use self::csv::CsvOptions;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{ProfileError, Result};

/// A single raw cell. `None` means the field was absent from the source record.
pub type Cell = Option<String>;

/// One record of a dataset, holding a cell per schema column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Returns the raw value at a column position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|cell| cell.as_deref())
    }

    /// Returns the cells in schema order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Content fingerprint identifying a dataset.
///
/// Two datasets with the same columns and the same cells, in the same order,
/// share an id. Derived results are cached under this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatasetId(String);

impl DatasetId {
    fn compute(columns: &[String], rows: &[Row]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((columns.len() as u64).to_le_bytes());
        for column in columns {
            hasher.update((column.len() as u64).to_le_bytes());
            hasher.update(column.as_bytes());
        }
        hasher.update((rows.len() as u64).to_le_bytes());
        for row in rows {
            for cell in &row.cells {
                match cell {
                    None => hasher.update([0u8]),
                    Some(value) => {
                        hasher.update([1u8]);
                        hasher.update((value.len() as u64).to_le_bytes());
                        hasher.update(value.as_bytes());
                    }
                }
            }
        }
        let hash = hasher.finalize();
        // First 16 bytes (32 hex chars) are plenty for an in-process cache key
        DatasetId(hex::encode(&hash[..16]))
    }

    /// Returns the hex form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable, schema-validated table of raw string cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
    id: DatasetId,
}

impl Dataset {
    /// Creates a dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::assemble(Vec::new(), Vec::new())
    }

    /// Creates a header-only dataset.
    pub fn with_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rows(columns, Vec::new())
    }

    /// Builds a dataset from a column list and positional rows.
    ///
    /// Every row must carry exactly one cell per column.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Cell>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = validate_header(columns.into_iter().map(Into::into).collect())?;
        let mut validated = Vec::with_capacity(rows.len());
        for (index, cells) in rows.into_iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(ProfileError::SchemaMismatch {
                    row: index,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }
            validated.push(Row::new(cells));
        }
        Ok(Self::assemble(columns, validated))
    }

    /// Builds a dataset from key/value records.
    ///
    /// The keys of the first record, in order, become the schema. Later records
    /// may list keys in any order; a key they omit becomes an absent cell, and a
    /// key outside the schema is rejected.
    pub fn from_records<I, R, K, V>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        let mut records = records.into_iter();
        let Some(first) = records.next() else {
            return Ok(Self::empty());
        };

        let mut columns: Vec<String> = Vec::new();
        let mut first_cells: Vec<Cell> = Vec::new();
        for (key, value) in first {
            columns.push(key.into());
            first_cells.push(value.into().0);
        }
        let columns = validate_header(columns)?;

        let mut rows = vec![Row::new(first_cells)];
        for (offset, record) in records.enumerate() {
            let row_index = offset + 1;
            let mut cells: Vec<Cell> = vec![None; columns.len()];
            for (key, value) in record {
                let key: String = key.into();
                let Some(position) = columns.iter().position(|column| *column == key) else {
                    return Err(ProfileError::UnknownColumn {
                        row: row_index,
                        column: key,
                    });
                };
                cells[position] = value.into().0;
            }
            rows.push(Row::new(cells));
        }

        Ok(Self::assemble(columns, rows))
    }

    fn assemble(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let id = DatasetId::compute(&columns, &rows);
        debug!(
            dataset_id = %id,
            rows = rows.len(),
            columns = columns.len(),
            "Assembled dataset"
        );
        Self { columns, rows, id }
    }

    /// Content fingerprint of the dataset.
    pub fn id(&self) -> &DatasetId {
        &self.id
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column in the schema.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    /// Returns true if the schema contains the column.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Rows in their original order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns true when the dataset has no rows. Header-only datasets are empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The raw value of one cell.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// Iterates over one column by position, top to bottom.
    pub fn column_at(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows.iter().map(move |row| row.get(index))
    }

    /// Iterates over one column by name, or `None` when the column is unknown.
    pub fn column(&self, column: &str) -> Option<impl Iterator<Item = Option<&str>> + '_> {
        self.column_index(column).map(|index| self.column_at(index))
    }

    /// The first `limit` rows, for table previews.
    pub fn head(&self, limit: usize) -> &[Row] {
        &self.rows[..limit.min(self.rows.len())]
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

/// A raw value accepted by [`Dataset::from_records`].
///
/// Converts from `&str`, `String` and their `Option` forms, so records can be
/// written as plain string pairs or with explicit absent values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue(Cell);

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue(Some(value.to_string()))
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue(Some(value))
    }
}

impl From<Option<&str>> for RawValue {
    fn from(value: Option<&str>) -> Self {
        RawValue(value.map(str::to_string))
    }
}

impl From<Option<String>> for RawValue {
    fn from(value: Option<String>) -> Self {
        RawValue(value)
    }
}

fn validate_header(columns: Vec<String>) -> Result<Vec<String>> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in &columns {
        if !seen.insert(column.as_str()) {
            return Err(ProfileError::DuplicateColumn {
                column: column.clone(),
            });
        }
    }
    Ok(columns)
}
