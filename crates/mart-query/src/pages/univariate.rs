use mart_core::{Dataset, Field, MartResult};
use mart_viz::{ChartBinding, ChartKind};

use super::output;
use crate::aggregate::{self, Agg, Measure};
use crate::catalog::{Question, QueryOutput, UnivariateQuestion};

pub fn run(question: UnivariateQuestion, dataset: &Dataset) -> MartResult<QueryOutput> {
    let q = Question::Univariate(question);
    match question {
        UnivariateQuestion::UnitPriceDistribution => output(
            q,
            aggregate::box_summary(dataset, &[], Field::UnitPrice)?,
            ChartKind::Box,
            ChartBinding::new().x("variable"),
            "Unit Price Distribution",
        ),
        UnivariateQuestion::PaymentFrequency => output(
            q,
            aggregate::frequency(dataset, Field::Payment, "count")?,
            ChartKind::Histogram,
            ChartBinding::new().x(Field::Payment.label()).y("count"),
            "Payment Method Frequency",
        ),
        UnivariateQuestion::RatingDistribution => output(
            q,
            aggregate::box_summary(dataset, &[], Field::Rating)?,
            ChartKind::Box,
            ChartBinding::new().x("variable"),
            "Customer Ratings Distribution",
        ),
        UnivariateQuestion::TopProductLine => output(
            q,
            aggregate::value_counts(dataset, Field::ProductLine, "Count")?,
            ChartKind::Bar,
            ChartBinding::new().x(Field::ProductLine.label()).y("Count"),
            "Most Frequently Purchased Product Line",
        ),
        UnivariateQuestion::QuantityPerProductLine => output(
            q,
            aggregate::group_aggregate(
                dataset,
                &[Field::ProductLine],
                &[Measure::named_after(Field::Quantity, Agg::Mean)],
            )?,
            ChartKind::Bar,
            ChartBinding::new()
                .x(Field::ProductLine.label())
                .y(Field::Quantity.label()),
            "Average Quantity by Product Line",
        ),
    }
}
