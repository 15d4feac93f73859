use anyhow::{Context, Result};
use chrono::NaiveDate;
use mart_core::Dataset;
use mart_io::DatasetHandle;
use mart_query::filter::product_line_counts;
use mart_query::DateCityFilter;
use tracing::info;

use super::print_table;

/// Filter page state from optional flags; anything left out keeps the page's
/// initial value (full date span, every city).
pub fn build_filter(
    dataset: &Dataset,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    cities: &[String],
) -> DateCityFilter {
    let mut filter = DateCityFilter::full_range(dataset);
    if let Some(start) = start {
        filter.start = start;
    }
    if let Some(end) = end {
        filter.end = end;
    }
    if !cities.is_empty() {
        filter.cities = cities.to_vec();
    }
    filter
}

pub fn handle(
    handle: &DatasetHandle,
    start: NaiveDate,
    end: NaiveDate,
    cities: &[String],
) -> Result<()> {
    let dataset = handle
        .get()
        .with_context(|| format!("loading dataset from {}", handle.path().display()))?;
    let filter = build_filter(&dataset, Some(start), Some(end), cities);
    info!(start = %filter.start, end = %filter.end, cities = ?filter.cities, "filtering");

    let filtered = filter.apply(&dataset);
    println!(
        "{} of {} records between {} and {} in {}",
        filtered.len(),
        dataset.len(),
        filter.start,
        filter.end,
        filter.cities.join(", ")
    );
    if filtered.is_empty() {
        return Ok(());
    }
    let counts = product_line_counts(&filtered)?;
    print_table(&counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mart_core::testing::record;

    #[test]
    fn missing_flags_keep_full_range() {
        let dataset: Dataset = vec![
            record("A", "2019-01-05", 100.0),
            record("B", "2019-03-10", 50.0),
        ]
        .into_iter()
        .collect();
        let jan = NaiveDate::from_ymd_opt(2019, 1, 31);
        let filter = build_filter(&dataset, None, jan, &[]);
        assert_eq!(filter.start, NaiveDate::from_ymd_opt(2019, 1, 5).unwrap());
        assert_eq!(Some(filter.end), jan);
        assert_eq!(filter.cities, vec!["A", "B"]);

        let only_b = build_filter(&dataset, None, None, &["B".to_string()]);
        assert_eq!(only_b.apply(&dataset).len(), 1);
    }
}
