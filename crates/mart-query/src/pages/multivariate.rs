use mart_core::{Dataset, DerivedTable, Field, MartResult};
use mart_viz::{BarMode, ChartBinding, ChartKind};

use super::output;
use crate::aggregate::{self, Agg, Measure};
use crate::catalog::{MultivariateQuestion, Question, QueryOutput};

pub fn run(question: MultivariateQuestion, dataset: &Dataset) -> MartResult<QueryOutput> {
    let q = Question::Multivariate(question);
    match question {
        MultivariateQuestion::IncomeByCityAndCustomerType => output(
            q,
            aggregate::box_summary(
                dataset,
                &[Field::City, Field::CustomerType],
                Field::GrossIncome,
            )?,
            ChartKind::Box,
            ChartBinding::new()
                .x(Field::City.label())
                .color(Field::CustomerType.label()),
            "Gross Income by City and Customer Type",
        ),
        MultivariateQuestion::PriceQuantityTotal => output(
            q,
            DerivedTable::from_records(
                dataset,
                &[
                    Field::UnitPrice,
                    Field::Quantity,
                    Field::Total,
                    Field::ProductLine,
                ],
            ),
            ChartKind::Scatter,
            ChartBinding::new()
                .x(Field::UnitPrice.label())
                .y(Field::Quantity.label())
                .size(Field::Total.label())
                .color(Field::ProductLine.label()),
            "Unit Price vs Quantity vs Total",
        ),
        MultivariateQuestion::IncomeByGenderAndProductLine => output(
            q,
            aggregate::group_aggregate(
                dataset,
                &[Field::Gender, Field::ProductLine],
                &[Measure::named_after(Field::GrossIncome, Agg::Mean)],
            )?,
            ChartKind::Bar,
            ChartBinding::new()
                .x(Field::ProductLine.label())
                .y(Field::GrossIncome.label())
                .color(Field::Gender.label())
                .bar_mode(BarMode::Group),
            "Gross Income by Product Line & Gender",
        ),
        MultivariateQuestion::RatingByBranchAndProductLine => output(
            q,
            aggregate::group_aggregate(
                dataset,
                &[Field::Branch, Field::ProductLine],
                &[Measure::named_after(Field::Rating, Agg::Mean)],
            )?,
            ChartKind::Bar,
            ChartBinding::new()
                .x(Field::Branch.label())
                .y(Field::Rating.label())
                .color(Field::ProductLine.label())
                .bar_mode(BarMode::Group),
            "Rating by Branch & Product Line",
        ),
        MultivariateQuestion::SalesByDatePaymentBranch => output(
            q,
            aggregate::group_aggregate(
                dataset,
                &[Field::Branch, Field::Date, Field::Payment],
                &[Measure::named_after(Field::Total, Agg::Sum)],
            )?,
            ChartKind::FacetedScatter,
            ChartBinding::new()
                .x(Field::Date.label())
                .y(Field::Total.label())
                .color(Field::Payment.label())
                .facet(Field::Branch.label()),
            "Sales by Date, Payment, and Branch",
        ),
    }
}
