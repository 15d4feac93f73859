use mart_core::{Dataset, DerivedTable, Field, MartResult};
use mart_viz::{ChartBinding, ChartKind};

use super::output;
use crate::catalog::{FilterQuestion, Question, QueryOutput};
use crate::filter::{product_line_counts, DateCityFilter};

pub fn run(
    question: FilterQuestion,
    dataset: &Dataset,
    filter: &DateCityFilter,
) -> MartResult<QueryOutput> {
    let q = Question::Filter(question);
    let filtered = filter.apply(dataset);
    let matched = format!(
        "{} of {} records between {} and {}",
        filtered.len(),
        dataset.len(),
        filter.start,
        filter.end
    );
    let out = match question {
        FilterQuestion::FilteredData => output(
            q,
            DerivedTable::from_records(&filtered, &Field::ALL),
            ChartKind::Table,
            ChartBinding::new(),
            "Filtered Data",
        )?,
        FilterQuestion::ProductLineCounts => output(
            q,
            product_line_counts(&filtered)?,
            ChartKind::Bar,
            ChartBinding::new().x(Field::ProductLine.label()).y("Count"),
            "Product Line Count",
        )?,
    };
    Ok(out.with_note(matched))
}
