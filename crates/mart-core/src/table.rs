//! Derived tables: the pure-data result of every query.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::{MartError, MartResult};
use crate::record::{Dataset, Field};

/// A single typed value in a [`DerivedTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => match f.precision() {
                Some(p) => write!(f, "{v:.p$}"),
                None => write!(f, "{v}"),
            },
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<usize> for Cell {
    fn from(v: usize) -> Self {
        Cell::Int(v as i64)
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Cell::Null, Cell::Float)
    }
}

impl From<NaiveDate> for Cell {
    fn from(d: NaiveDate) -> Self {
        Cell::Date(d)
    }
}

/// Named columns over row-major cells.
///
/// Every row has exactly `columns().len()` cells; [`DerivedTable::push_row`]
/// rejects ragged rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DerivedTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Projects `fields` of every record, keeping dataset order.
    pub fn from_records(dataset: &Dataset, fields: &[Field]) -> Self {
        let mut table = DerivedTable::new(fields.iter().map(|f| f.label()));
        table.rows = dataset
            .iter()
            .map(|record| fields.iter().map(|&f| record.cell(f)).collect())
            .collect();
        table
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> MartResult<()> {
        if row.len() != self.columns.len() {
            return Err(MartError::Validation(format!(
                "row has {} cells but table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of column `name`, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Stable sort on a numeric column, largest first. Nulls sink to the bottom.
    pub fn sort_desc_by(&mut self, name: &str) -> MartResult<()> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| MartError::Validation(format!("no column named '{name}'")))?;
        self.rows.sort_by(|a, b| match (a[idx].as_f64(), b[idx].as_f64()) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    #[test]
    fn ragged_rows_are_rejected() {
        let mut table = DerivedTable::new(["City", "Total"]);
        assert!(table.push_row(vec!["A".into()]).is_err());
        table.push_row(vec!["A".into(), 1.0.into()]).unwrap();
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn projection_keeps_row_order() {
        let dataset: Dataset = vec![
            record("B", "2019-01-10", 50.0),
            record("A", "2019-01-05", 100.0),
        ]
        .into_iter()
        .collect();
        let table = DerivedTable::from_records(&dataset, &[Field::City, Field::Total]);
        assert_eq!(table.columns(), &["City", "Total"]);
        let cities: Vec<_> = table.column("City").unwrap().cloned().collect();
        assert_eq!(cities, vec![Cell::from("B"), Cell::from("A")]);
    }

    #[test]
    fn sort_desc_is_stable_and_sinks_nulls() {
        let mut table = DerivedTable::new(["k", "v"]);
        table.push_row(vec!["a".into(), 1.0.into()]).unwrap();
        table.push_row(vec!["b".into(), Cell::Null]).unwrap();
        table.push_row(vec!["c".into(), 3.0.into()]).unwrap();
        table.push_row(vec!["d".into(), 1.0.into()]).unwrap();
        table.sort_desc_by("v").unwrap();
        let keys: Vec<_> = table
            .column("k")
            .unwrap()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(keys, vec!["c", "a", "d", "b"]);
        assert!(table.sort_desc_by("missing").is_err());
    }

    #[test]
    fn float_display_honours_precision() {
        assert_eq!(format!("{:.2}", Cell::Float(1.0 / 3.0)), "0.33");
        assert_eq!(Cell::Null.to_string(), "");
    }
}
