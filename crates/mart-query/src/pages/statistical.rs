use mart_core::stats::BoxSummary;
use mart_core::{Dataset, Field, MartResult};
use mart_viz::{ChartBinding, ChartKind};

use super::output;
use crate::aggregate::{self, Agg, Measure};
use crate::catalog::{Question, QueryOutput, StatisticalQuestion};

pub fn run(question: StatisticalQuestion, dataset: &Dataset) -> MartResult<QueryOutput> {
    let q = Question::Statistical(question);
    match question {
        StatisticalQuestion::IncomePerProductLine => output(
            q,
            aggregate::group_aggregate(
                dataset,
                &[Field::ProductLine],
                &[Measure::named_after(Field::GrossIncome, Agg::Mean)],
            )?,
            ChartKind::Bar,
            ChartBinding::new()
                .x(Field::ProductLine.label())
                .y(Field::GrossIncome.label()),
            "Average Gross Income per Product Line",
        ),
        StatisticalQuestion::AverageTotalByCity => {
            let mut table = aggregate::group_aggregate(
                dataset,
                &[Field::City],
                &[Measure::named_after(Field::Total, Agg::Mean)],
            )?;
            table.sort_desc_by(Field::Total.label())?;
            output(
                q,
                table,
                ChartKind::Table,
                ChartBinding::new(),
                "Highest Average Total Sales by City",
            )
        }
        StatisticalQuestion::RatingOutliers => {
            let out = output(
                q,
                aggregate::box_summary(dataset, &[], Field::Rating)?,
                ChartKind::Box,
                ChartBinding::new().x("variable"),
                "Rating Distribution",
            )?;
            Ok(out.with_note(outlier_note(dataset)))
        }
        StatisticalQuestion::SalesByGender => output(
            q,
            aggregate::group_aggregate(
                dataset,
                &[Field::Gender],
                &[Measure::named_after(Field::Total, Agg::Sum)],
            )?,
            ChartKind::Bar,
            ChartBinding::new()
                .x(Field::Gender.label())
                .y(Field::Total.label()),
            "Total Sales by Gender",
        ),
        StatisticalQuestion::PaymentSpending => {
            let mut table = aggregate::group_aggregate(
                dataset,
                &[Field::Payment],
                &[
                    Measure::named_after(Field::InvoiceId, Agg::Count),
                    Measure::named_after(Field::Total, Agg::Mean),
                ],
            )?;
            table.sort_desc_by(Field::InvoiceId.label())?;
            output(
                q,
                table,
                ChartKind::Table,
                ChartBinding::new(),
                "Popular Payment Methods and Spending",
            )
        }
    }
}

/// Invoices whose rating falls outside the Tukey fences.
fn outlier_note(dataset: &Dataset) -> String {
    let Some(summary) = BoxSummary::from_values(&dataset.numbers(Field::Rating)) else {
        return "Outliers: no ratings".to_string();
    };
    let flagged: Vec<&str> = dataset
        .iter()
        .filter(|r| r.rating.is_some_and(|v| summary.is_outlier(v)))
        .map(|r| r.invoice_id.as_str())
        .collect();
    if flagged.is_empty() {
        "Outliers: none".to_string()
    } else {
        format!("Outliers ({}): {}", flagged.len(), flagged.join(", "))
    }
}
