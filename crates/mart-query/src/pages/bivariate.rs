use mart_core::stats::{linear_fit, pearson};
use mart_core::{Cell, Dataset, DerivedTable, Field, MartResult};
use mart_viz::{ChartBinding, ChartKind};

use super::output;
use crate::aggregate::{self, Agg, Measure};
use crate::catalog::{BivariateQuestion, Question, QueryOutput};

/// Pearson correlation between two numeric columns over rows where both are
/// present.
pub fn correlation(dataset: &Dataset, a: Field, b: Field) -> Option<f64> {
    let (xs, ys) = aggregate::paired(dataset, a, b);
    pearson(&xs, &ys)
}

pub fn run(question: BivariateQuestion, dataset: &Dataset) -> MartResult<QueryOutput> {
    let q = Question::Bivariate(question);
    match question {
        BivariateQuestion::SalesByProductLine => output(
            q,
            aggregate::group_aggregate(
                dataset,
                &[Field::ProductLine],
                &[Measure::named_after(Field::Total, Agg::Sum)],
            )?,
            ChartKind::Bar,
            ChartBinding::new()
                .x(Field::ProductLine.label())
                .y(Field::Total.label()),
            "Total Sales by Product Line",
        ),
        BivariateQuestion::PriceQuantityCorrelation => {
            let note = match correlation(dataset, Field::UnitPrice, Field::Quantity) {
                Some(r) => format!("Correlation: {r:.2}"),
                None => "Correlation: undefined".to_string(),
            };
            Ok(output(
                q,
                DerivedTable::from_records(dataset, &[Field::UnitPrice, Field::Quantity]),
                ChartKind::Scatter,
                ChartBinding::new()
                    .x(Field::UnitPrice.label())
                    .y(Field::Quantity.label()),
                "Unit Price vs Quantity",
            )?
            .with_note(note))
        }
        BivariateQuestion::IncomeByGender => output(
            q,
            aggregate::group_aggregate(
                dataset,
                &[Field::Gender],
                &[Measure::named_after(Field::GrossIncome, Agg::Mean)],
            )?,
            ChartKind::Bar,
            ChartBinding::new()
                .x(Field::Gender.label())
                .y(Field::GrossIncome.label()),
            "Average Gross Income by Gender",
        ),
        BivariateQuestion::RatingVsTotal => rating_vs_total(q, dataset),
    }
}

fn rating_vs_total(q: Question, dataset: &Dataset) -> MartResult<QueryOutput> {
    let (ratings, totals) = aggregate::paired(dataset, Field::Rating, Field::Total);
    let fit = linear_fit(&ratings, &totals);

    let mut table = DerivedTable::new([Field::Rating.label(), Field::Total.label(), "trend"]);
    for (&x, &y) in ratings.iter().zip(&totals) {
        let trend = fit.map_or(Cell::Null, |f| Cell::Float(f.predict(x)));
        table.push_row(vec![x.into(), y.into(), trend])?;
    }

    let out = output(
        q,
        table,
        ChartKind::Scatter,
        ChartBinding::new()
            .x(Field::Rating.label())
            .y(Field::Total.label())
            .trend("trend"),
        "Rating vs Total",
    )?;
    Ok(match fit {
        Some(f) => out.with_note(format!(
            "Trend: Total = {:.2} * Rating + {:.2} (R² = {:.3})",
            f.slope, f.intercept, f.r_squared
        )),
        None => out.with_note("Trend: undefined"),
    })
}
