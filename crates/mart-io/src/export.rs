use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use mart_core::{Cell, DerivedTable, MartError, MartResult};
use polars::prelude::*;

fn frame_error(context: &str, err: PolarsError) -> MartError {
    MartError::Other(format!("{context}: {err}"))
}

/// Converts a derived table into a polars frame.
///
/// Columns whose non-null cells are all integers become `Int64`, all numeric
/// become `Float64`; anything else (text, dates, times, mixed) is rendered as
/// `Utf8` using the cell's display form.
pub fn to_dataframe(table: &DerivedTable) -> MartResult<DataFrame> {
    let mut series = Vec::with_capacity(table.width());
    for (idx, name) in table.columns().iter().enumerate() {
        let cells: Vec<&Cell> = table.rows().iter().map(|row| &row[idx]).collect();
        series.push(column_series(name, &cells));
    }
    DataFrame::new(series).map_err(|err| frame_error("assembling derived table frame", err))
}

fn column_series(name: &str, cells: &[&Cell]) -> Series {
    let non_null = || cells.iter().filter(|c| !c.is_null());
    if non_null().all(|c| matches!(c, Cell::Int(_))) {
        let values: Vec<Option<i64>> = cells
            .iter()
            .map(|c| match c {
                Cell::Int(v) => Some(*v),
                _ => None,
            })
            .collect();
        Series::new(name, values)
    } else if non_null().all(|c| c.as_f64().is_some()) {
        let values: Vec<Option<f64>> = cells.iter().map(|c| c.as_f64()).collect();
        Series::new(name, values)
    } else {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|c| (!c.is_null()).then(|| c.to_string()))
            .collect();
        Series::new(name, values)
    }
}

/// Writes `table` as CSV with a header row.
pub fn write_csv<W: Write>(table: &DerivedTable, writer: W) -> MartResult<()> {
    let mut df = to_dataframe(table)?;
    CsvWriter::new(writer)
        .finish(&mut df)
        .map_err(|err| frame_error("writing CSV", err))
}

/// Writes `table` to `path`; the extension picks the format (`.csv` or `.json`).
///
/// An unsupported extension is a [`MartError::Validation`] and nothing is
/// created; filesystem failures surface as [`MartError::Io`].
pub fn write_table(table: &DerivedTable, path: &Path) -> MartResult<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    if extension != "csv" && extension != "json" {
        return Err(MartError::Validation(format!(
            "unsupported output extension '{extension}'; use .csv or .json"
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    if extension == "csv" {
        write_csv(table, file)
    } else {
        serde_json::to_writer_pretty(file, table)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn counts() -> DerivedTable {
        let mut table = DerivedTable::new(["Product line", "Count", "Share"]);
        table
            .push_row(vec!["Fashion accessories".into(), 3usize.into(), 0.6.into()])
            .unwrap();
        table
            .push_row(vec!["Sports and travel".into(), 2usize.into(), Cell::Null])
            .unwrap();
        table
    }

    #[test]
    fn frame_columns_get_numeric_types() {
        let df = to_dataframe(&counts()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Count").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("Share").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Share").unwrap().null_count(), 1);
    }

    #[test]
    fn writes_csv_with_header() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("counts.csv");
        write_table(&counts(), &out).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("Product line,Count,Share"));
        assert!(text.contains("Fashion accessories,3,"));
    }

    #[test]
    fn csv_goes_to_any_writer() {
        let mut buf = Vec::new();
        write_csv(&counts(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Sports and travel,2,"));
    }

    #[test]
    fn writes_json() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("counts.json");
        write_table(&counts(), &out).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["columns"][1], "Count");
        assert_eq!(value["rows"][0][1], 3);
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("counts.xlsx");
        let err = write_table(&counts(), &out).unwrap_err();
        assert!(matches!(err, MartError::Validation(_)));
        assert!(!out.exists());
    }

    #[test]
    fn unwritable_target_is_an_io_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("taken.csv");
        fs::create_dir(&out).unwrap();
        let err = write_table(&counts(), &out).unwrap_err();
        assert!(matches!(err, MartError::Io(_)));
    }
}
