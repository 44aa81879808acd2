//! CSV decoding into a [`Dataset`] and encoding back out.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{Cell, Dataset};
use crate::error::{ProfileError, Result};

/// Options controlling how CSV input is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,
    /// Trim whitespace around headers and fields (default: false)
    pub trim: bool,
    /// Truncate records longer than the header instead of rejecting them (default: false)
    pub flexible: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
            flexible: false,
        }
    }
}

impl CsvOptions {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether surrounding whitespace is trimmed.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Sets whether over-long records are truncated.
    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }
}

impl Dataset {
    /// Decodes a CSV stream whose first record is the header.
    ///
    /// Blank lines are skipped. Records shorter than the header are padded with
    /// absent cells. Records longer than the header are rejected unless
    /// [`CsvOptions::flexible`] is set, in which case the extra fields are dropped.
    #[instrument(skip(reader))]
    pub fn from_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        let mut reader = ::csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(if options.trim {
                ::csv::Trim::All
            } else {
                ::csv::Trim::None
            })
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if columns.is_empty() || (columns.len() == 1 && columns[0].is_empty()) {
            return Ok(Dataset::empty());
        }

        let width = columns.len();
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        let mut truncated = 0usize;
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > width {
                if !options.flexible {
                    return Err(ProfileError::SchemaMismatch {
                        row: index,
                        expected: width,
                        found: record.len(),
                    });
                }
                truncated += 1;
            }

            let mut cells: Vec<Cell> = record
                .iter()
                .take(width)
                .map(|field| Some(field.to_string()))
                .collect();
            cells.resize(width, None);
            rows.push(cells);
        }

        if truncated > 0 {
            warn!(truncated, "Dropped extra fields from over-long CSV records");
        }
        info!(rows = rows.len(), columns = width, "Decoded CSV input");

        Dataset::from_rows(columns, rows)
    }

    /// Decodes CSV text with default options.
    pub fn from_csv_str(input: &str) -> Result<Self> {
        Self::from_csv_reader(input.as_bytes(), &CsvOptions::default())
    }

    /// Reads and decodes a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file, options)
    }

    /// Writes the header and all rows as CSV. Absent cells become empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = ::csv::Writer::from_writer(writer);
        writer.write_record(self.columns())?;
        for row in self.rows() {
            writer.write_record(row.cells().iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Encodes the dataset as CSV text.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| ProfileError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_defines_schema() {
        let dataset = Dataset::from_csv_str("a,b\n1,x\n2,y\n").unwrap();
        assert_eq!(dataset.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.value(1, "b"), Some("y"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dataset = Dataset::from_csv_str("a,b\n1,x\n\n2,y\n\n").unwrap();
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn test_short_records_are_padded() {
        let dataset = Dataset::from_csv_str("a,b,c\n1,2\n").unwrap();
        assert_eq!(
            dataset.rows()[0].cells(),
            &[Some("1".to_string()), Some("2".to_string()), None]
        );
    }

    #[test]
    fn test_long_records_rejected_unless_flexible() {
        let input = "a,b\n1,2,3\n";
        let err = Dataset::from_csv_str(input).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::SchemaMismatch {
                row: 0,
                expected: 2,
                found: 3
            }
        ));

        let options = CsvOptions::default().with_flexible(true);
        let dataset = Dataset::from_csv_reader(input.as_bytes(), &options).unwrap();
        assert_eq!(dataset.value(0, "b"), Some("2"));
    }

    #[test]
    fn test_header_only_input() {
        let dataset = Dataset::from_csv_str("a,b\n").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.column_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let dataset = Dataset::from_csv_str("").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.column_count(), 0);
    }

    #[test]
    fn test_semicolon_delimiter_and_trim() {
        let options = CsvOptions::default().with_delimiter(b';').with_trim(true);
        let dataset = Dataset::from_csv_reader("a ; b\n 1 ; x \n".as_bytes(), &options).unwrap();
        assert_eq!(dataset.value(0, "a"), Some("1"));
        assert_eq!(dataset.value(0, "b"), Some("x"));
    }

    #[test]
    fn test_write_csv_blanks_absent_cells() {
        let dataset = Dataset::from_records(vec![
            vec![("a", Some("1")), ("b", Some("hello, world"))],
            vec![("a", None), ("b", Some("z"))],
        ])
        .unwrap();

        let text = dataset.to_csv_string().unwrap();
        assert_eq!(text, "a,b\n1,\"hello, world\"\n,z\n");
    }
}
