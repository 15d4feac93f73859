//! One module per dashboard page. Each exposes `run(question, dataset)`.

pub mod bivariate;
pub mod filtered;
pub mod multivariate;
pub mod overview;
pub mod statistical;
pub mod univariate;

use mart_core::{DerivedTable, MartResult};
use mart_viz::{to_chart_spec, ChartBinding, ChartKind};

use crate::catalog::{Question, QueryOutput};

fn output(
    question: Question,
    table: DerivedTable,
    kind: ChartKind,
    binding: ChartBinding,
    title: &str,
) -> MartResult<QueryOutput> {
    let chart = to_chart_spec(&table, kind, binding, title)?;
    Ok(QueryOutput::new(question, table, chart))
}
