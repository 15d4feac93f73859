use mart_core::{Dataset, DerivedTable, Field, MartResult};
use mart_viz::{ChartBinding, ChartKind};

use super::output;
use crate::catalog::{OverviewQuestion, Question, QueryOutput};

pub fn run(question: OverviewQuestion, dataset: &Dataset) -> MartResult<QueryOutput> {
    let q = Question::Overview(question);
    match question {
        OverviewQuestion::RawData => output(
            q,
            DerivedTable::from_records(dataset, &Field::ALL),
            ChartKind::Table,
            ChartBinding::new(),
            "Raw Data Preview",
        ),
        OverviewQuestion::BasicInformation => {
            let mut table = DerivedTable::new(["Column", "Type"]);
            for field in Field::ALL {
                table.push_row(vec![field.label().into(), field.kind().as_str().into()])?;
            }
            Ok(output(q, table, ChartKind::Table, ChartBinding::new(), "Basic Information")?
                .with_note(format!("Number of Rows: {}", dataset.len()))
                .with_note(format!("Number of Columns: {}", Field::ALL.len())))
        }
        OverviewQuestion::MissingValues => {
            let mut table = DerivedTable::new(["Column", "Missing"]);
            for field in Field::ALL {
                let missing = dataset.iter().filter(|r| r.is_null(field)).count();
                table.push_row(vec![field.label().into(), missing.into()])?;
            }
            output(q, table, ChartKind::Table, ChartBinding::new(), "Missing Values")
        }
    }
}
