//! Group-by building blocks shared by the catalog pages.
//!
//! Grouped results come out ordered by key (text ascending, dates
//! chronological). Only non-null measure values are accumulated; a group
//! whose measure is entirely null reports a null mean.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mart_core::stats::BoxSummary;
use mart_core::{Cell, Dataset, DerivedTable, Field, FieldKind, MartResult, Record};

/// One component of a grouping key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyPart {
    Date(NaiveDate),
    Text(String),
}

impl KeyPart {
    fn of(record: &Record, field: Field) -> KeyPart {
        match record.cell(field) {
            Cell::Date(d) => KeyPart::Date(d),
            Cell::Text(s) => KeyPart::Text(s),
            other => KeyPart::Text(other.to_string()),
        }
    }
}

impl From<KeyPart> for Cell {
    fn from(part: KeyPart) -> Self {
        match part {
            KeyPart::Date(d) => Cell::Date(d),
            KeyPart::Text(s) => Cell::Text(s),
        }
    }
}

fn group_key(record: &Record, keys: &[Field]) -> Vec<KeyPart> {
    keys.iter().map(|&f| KeyPart::of(record, f)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agg {
    Sum,
    Mean,
    /// Number of non-null values
    Count,
}

/// One aggregated output column.
#[derive(Debug, Clone, Copy)]
pub struct Measure<'a> {
    pub field: Field,
    pub agg: Agg,
    /// Output column name
    pub name: &'a str,
}

impl<'a> Measure<'a> {
    pub fn new(field: Field, agg: Agg, name: &'a str) -> Self {
        Self { field, agg, name }
    }

    /// Output column named after the source column, as a reset index would.
    pub fn named_after(field: Field, agg: Agg) -> Self {
        Self::new(field, agg, field.label())
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct BucketStats {
    count: usize,
    sum: f64,
}

impl BucketStats {
    fn finish(&self, agg: Agg) -> Cell {
        match agg {
            Agg::Sum => Cell::Float(self.sum),
            Agg::Count => Cell::from(self.count),
            Agg::Mean if self.count == 0 => Cell::Null,
            Agg::Mean => Cell::Float(self.sum / self.count as f64),
        }
    }
}

/// Groups `dataset` by `keys` and computes every measure per group.
///
/// Output columns are the key labels followed by the measure names.
pub fn group_aggregate(
    dataset: &Dataset,
    keys: &[Field],
    measures: &[Measure<'_>],
) -> MartResult<DerivedTable> {
    let mut buckets: BTreeMap<Vec<KeyPart>, Vec<BucketStats>> = BTreeMap::new();
    for record in dataset {
        let entry = buckets
            .entry(group_key(record, keys))
            .or_insert_with(|| vec![BucketStats::default(); measures.len()]);
        for (stats, measure) in entry.iter_mut().zip(measures) {
            match measure.field.kind() {
                FieldKind::Integer | FieldKind::Decimal => {
                    if let Some(value) = record.number(measure.field) {
                        stats.count += 1;
                        stats.sum += value;
                    }
                }
                _ => {
                    if !record.is_null(measure.field) {
                        stats.count += 1;
                    }
                }
            }
        }
    }

    let columns = keys
        .iter()
        .map(|f| f.label())
        .chain(measures.iter().map(|m| m.name));
    let mut table = DerivedTable::new(columns);
    for (key, stats) in buckets {
        let mut row: Vec<Cell> = key.into_iter().map(Cell::from).collect();
        row.extend(stats.iter().zip(measures).map(|(s, m)| s.finish(m.agg)));
        table.push_row(row)?;
    }
    Ok(table)
}

/// Occurrences of each value of `field` in first-encountered order.
pub fn frequency(dataset: &Dataset, field: Field, count_name: &str) -> MartResult<DerivedTable> {
    let mut counts: Vec<(KeyPart, usize)> = Vec::new();
    for record in dataset {
        let key = KeyPart::of(record, field);
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }

    let mut table = DerivedTable::new([field.label(), count_name]);
    for (key, n) in counts {
        table.push_row(vec![key.into(), n.into()])?;
    }
    Ok(table)
}

/// Value counts of `field`, most frequent first; ties keep first-encountered
/// order.
pub fn value_counts(
    dataset: &Dataset,
    field: Field,
    count_name: &str,
) -> MartResult<DerivedTable> {
    let mut table = frequency(dataset, field, count_name)?;
    table.sort_desc_by(count_name)?;
    Ok(table)
}

/// Columns of a box-summary table, after any group keys.
pub const BOX_COLUMNS: [&str; 12] = [
    "variable",
    "count",
    "mean",
    "std",
    "min",
    "q1",
    "median",
    "q3",
    "max",
    "lower_fence",
    "upper_fence",
    "outliers",
];

/// One box-plot summary of `value` per group of `keys` (a single row when
/// `keys` is empty). Groups with no non-null values are skipped.
pub fn box_summary(
    dataset: &Dataset,
    keys: &[Field],
    value: Field,
) -> MartResult<DerivedTable> {
    let mut groups: BTreeMap<Vec<KeyPart>, Vec<f64>> = BTreeMap::new();
    for record in dataset {
        let values = groups.entry(group_key(record, keys)).or_default();
        if let Some(v) = record.number(value) {
            values.push(v);
        }
    }

    let columns = keys
        .iter()
        .map(|f| f.label())
        .chain(BOX_COLUMNS.iter().copied());
    let mut table = DerivedTable::new(columns);
    for (key, values) in groups {
        let Some(summary) = BoxSummary::from_values(&values) else {
            continue;
        };
        let mut row: Vec<Cell> = key.into_iter().map(Cell::from).collect();
        row.extend(box_row(value, &summary));
        table.push_row(row)?;
    }
    Ok(table)
}

fn box_row(value: Field, summary: &BoxSummary) -> Vec<Cell> {
    let s = &summary.stats;
    vec![
        value.label().into(),
        s.count.into(),
        s.mean.into(),
        s.std.into(),
        s.min.into(),
        s.q1.into(),
        s.median.into(),
        s.q3.into(),
        s.max.into(),
        summary.lower_fence.into(),
        summary.upper_fence.into(),
        summary.outliers.into(),
    ]
}

/// `(x, y)` pairs where both values are present, in row order.
pub fn paired(dataset: &Dataset, x: Field, y: Field) -> (Vec<f64>, Vec<f64>) {
    dataset
        .iter()
        .filter_map(|r| Some((r.number(x)?, r.number(y)?)))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mart_core::testing::record;

    fn three_records() -> Dataset {
        vec![
            record("A", "2019-01-05", 100.0),
            record("B", "2019-01-10", 50.0),
            record("A", "2019-02-01", 75.0),
        ]
        .into_iter()
        .collect()
    }

    fn as_pairs(table: &DerivedTable) -> Vec<(String, f64)> {
        table
            .rows()
            .iter()
            .map(|row| (row[0].to_string(), row[1].as_f64().unwrap()))
            .collect()
    }

    #[test]
    fn sums_total_by_city() {
        let table = group_aggregate(
            &three_records(),
            &[Field::City],
            &[Measure::named_after(Field::Total, Agg::Sum)],
        )
        .unwrap();
        assert_eq!(table.columns(), &["City", "Total"]);
        assert_eq!(
            as_pairs(&table),
            vec![("A".to_string(), 175.0), ("B".to_string(), 50.0)]
        );
    }

    #[test]
    fn grouped_sums_ignore_row_order() {
        let forward = three_records();
        let mut reversed: Vec<Record> = forward.records().to_vec();
        reversed.reverse();
        let reversed: Dataset = reversed.into_iter().collect();
        let measure = [Measure::named_after(Field::Total, Agg::Sum)];
        let a = group_aggregate(&forward, &[Field::City], &measure).unwrap();
        let b = group_aggregate(&reversed, &[Field::City], &measure).unwrap();
        for ((ka, va), (kb, vb)) in as_pairs(&a).into_iter().zip(as_pairs(&b)) {
            assert_eq!(ka, kb);
            assert!((va - vb).abs() < 1e-9);
        }
    }

    #[test]
    fn mean_skips_nulls_and_count_counts_present_values() {
        let mut records = three_records().records().to_vec();
        records[2].total = None;
        let dataset: Dataset = records.into_iter().collect();
        let table = group_aggregate(
            &dataset,
            &[Field::City],
            &[
                Measure::new(Field::Total, Agg::Mean, "mean"),
                Measure::new(Field::Total, Agg::Count, "n"),
                Measure::new(Field::InvoiceId, Agg::Count, "invoices"),
            ],
        )
        .unwrap();
        let a = &table.rows()[0];
        assert_eq!(a[1], Cell::Float(100.0));
        assert_eq!(a[2], Cell::Int(1));
        assert_eq!(a[3], Cell::Int(2));
    }

    #[test]
    fn value_counts_break_ties_by_first_appearance() {
        let mut records = Vec::new();
        for (line, city) in [
            ("Sports and travel", "A"),
            ("Food and beverages", "A"),
            ("Food and beverages", "B"),
            ("Sports and travel", "B"),
            ("Fashion accessories", "B"),
        ] {
            let mut r = record(city, "2019-01-05", 1.0);
            r.product_line = line.to_string();
            records.push(r);
        }
        let dataset: Dataset = records.into_iter().collect();
        let table = value_counts(&dataset, Field::ProductLine, "Count").unwrap();
        let keys: Vec<_> = table.rows().iter().map(|r| r[0].to_string()).collect();
        assert_eq!(
            keys,
            vec!["Sports and travel", "Food and beverages", "Fashion accessories"]
        );
    }

    #[test]
    fn date_keys_sort_chronologically() {
        let table = group_aggregate(
            &three_records(),
            &[Field::Date],
            &[Measure::named_after(Field::Total, Agg::Sum)],
        )
        .unwrap();
        let dates: Vec<_> = table.rows().iter().map(|r| r[0].to_string()).collect();
        assert_eq!(dates, vec!["2019-01-05", "2019-01-10", "2019-02-01"]);
    }

    #[test]
    fn box_summary_has_one_row_per_group() {
        let table = box_summary(&three_records(), &[Field::City], Field::Total).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.columns()[0], "City");
        assert_eq!(table.columns()[1], "variable");
        let ungrouped = box_summary(&three_records(), &[], Field::Total).unwrap();
        assert_eq!(ungrouped.height(), 1);
        assert_eq!(ungrouped.rows()[0][1], Cell::Int(3));
    }
}
