//! Reusable datasets for tests and benchmarks.
//!
//! Each fixture exercises a particular corner of the profiler: missing-value
//! tokens, duplicates, mixed-type columns, degenerate columns.

use crate::dataset::{Cell, Dataset};
use crate::error::Result;

/// The three-row dataset used throughout the documentation: `a` is numeric with
/// one empty cell, `b` is categorical with `x` twice.
pub fn create_basic_dataset() -> Result<Dataset> {
    Dataset::from_records(vec![
        vec![("a", "1"), ("b", "x")],
        vec![("a", "2"), ("b", "y")],
        vec![("a", ""), ("b", "x")],
    ])
}

/// Customers with every kind of missing value and one duplicated row.
pub fn create_dataset_with_nulls() -> Result<Dataset> {
    Dataset::from_csv_str(
        "id,name,email,age,score\n\
         1,Alice,alice@example.com,34,88.5\n\
         2,,bob@example.com,NA,92.0\n\
         3,Charlie,null,29,\n\
         4,David,david@example.com,nan,75.25\n\
         5,NULL,eve@example.com,41,60\n\
         3,Charlie,null,29,\n",
    )
}

/// Columns that stress type inference: strict numerics, scientific notation,
/// thousands separators and an even numeric/text split.
pub fn create_mixed_type_dataset() -> Result<Dataset> {
    Dataset::from_csv_str(
        "strict,scientific,separated,split,padded\n\
         1,1e5,\"1,000\",1,  3  \n\
         -2.5,2e3,\"2,500\",a,4\n\
         +3,3.1e2,\"10,000\",2,  5\n\
         4.0,4E1,\"7,000\",b,6 \n",
    )
}

/// A single numeric value repeated `rows` times.
pub fn create_constant_dataset(rows: usize, value: &str) -> Result<Dataset> {
    let cells: Vec<Vec<Cell>> = (0..rows).map(|_| vec![Some(value.to_string())]).collect();
    Dataset::from_rows(["value"], cells)
}

/// `rows` deterministic rows of sensor readings: an id, a categorical station,
/// a numeric reading with periodic gaps and a timestamp-like label.
pub fn create_sensor_dataset(rows: usize) -> Result<Dataset> {
    const STATIONS: [&str; 5] = ["north", "south", "east", "west", "central"];

    let cells: Vec<Vec<Cell>> = (0..rows)
        .map(|i| {
            let reading = if i % 17 == 0 {
                None
            } else if i % 23 == 0 {
                Some("error".to_string())
            } else {
                Some(format!("{:.2}", ((i * 37) % 1000) as f64 / 10.0))
            };
            vec![
                Some(i.to_string()),
                Some(STATIONS[i % STATIONS.len()].to_string()),
                reading,
                Some(format!("t{:05}", i % 500)),
            ]
        })
        .collect();

    Dataset::from_rows(["id", "station", "reading", "label"], cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_build() {
        assert_eq!(create_basic_dataset().unwrap().row_count(), 3);
        assert_eq!(create_dataset_with_nulls().unwrap().row_count(), 6);
        assert_eq!(create_mixed_type_dataset().unwrap().column_count(), 5);
        assert_eq!(create_constant_dataset(4, "5").unwrap().row_count(), 4);

        let sensors = create_sensor_dataset(100).unwrap();
        assert_eq!(sensors.row_count(), 100);
        assert_eq!(sensors.value(0, "reading"), None);
        assert_eq!(sensors.value(23, "reading"), Some("error"));
    }
}
