use chrono::NaiveDate;
use mart_core::{Dataset, DerivedTable, Field, MartResult};
use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate;

/// Date-range and city predicate of the "Filter by Date & City" page.
///
/// Both date bounds are inclusive. An inverted range (`start > end`) or an
/// empty city set selects nothing; neither is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCityFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cities: Vec<String>,
}

impl DateCityFilter {
    pub fn new<I, S>(start: NaiveDate, end: NaiveDate, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start,
            end,
            cities: cities.into_iter().map(Into::into).collect(),
        }
    }

    /// The page's initial state: the full date span and every city.
    ///
    /// For an empty dataset the range collapses to a single arbitrary day and
    /// the city set is empty, so the filter still selects nothing.
    pub fn full_range(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_range()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MIN));
        Self::new(start, end, dataset.cities())
    }

    pub fn matches(&self, date: NaiveDate, city: &str) -> bool {
        self.start <= date && date <= self.end && self.cities.iter().any(|c| c == city)
    }

    /// Records satisfying both predicates, in their original order.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        if self.start > self.end {
            debug!(start = %self.start, end = %self.end, "inverted date range selects nothing");
            return Dataset::default();
        }
        let filtered: Dataset = dataset
            .iter()
            .filter(|r| self.matches(r.date, &r.city))
            .cloned()
            .collect();
        if filtered.is_empty() {
            warn!(
                start = %self.start,
                end = %self.end,
                cities = ?self.cities,
                "filter selected no records"
            );
        }
        filtered
    }
}

/// Product-line frequency over an already filtered dataset.
pub fn product_line_counts(filtered: &Dataset) -> MartResult<DerivedTable> {
    aggregate::value_counts(filtered, Field::ProductLine, "Count")
}
