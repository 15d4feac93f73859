use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use mart_cli::OutputFormat;
use mart_io::DatasetHandle;
use mart_query::{catalog, Page, QueryOutput};
use tracing::info;

use super::filter::build_filter;
use super::print_table;

/// Selection and filter flags of `mart run`.
#[derive(Debug)]
pub struct RunRequest<'a> {
    pub page: &'a str,
    pub question: &'a str,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub cities: &'a [String],
}

impl RunRequest<'_> {
    fn has_filter(&self) -> bool {
        self.start.is_some() || self.end.is_some() || !self.cities.is_empty()
    }
}

pub fn handle(
    handle: &DatasetHandle,
    request: &RunRequest<'_>,
    format: OutputFormat,
    out: Option<&Path>,
) -> Result<()> {
    let question = catalog::resolve(request.page, request.question)?;
    let dataset = handle
        .get()
        .with_context(|| format!("loading dataset from {}", handle.path().display()))?;

    let filter = if request.has_filter() {
        if question.page() != Page::Filter {
            info!(page = %question.page(), "date/city flags only apply to the filter page");
        }
        Some(build_filter(&dataset, request.start, request.end, request.cities))
    } else {
        None
    };

    let output = catalog::run(question, &dataset, filter.as_ref())?;
    print_output(&output, format)?;

    if let Some(path) = out {
        mart_io::write_table(&output.table, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), rows = output.table.height(), "wrote derived table");
    }
    Ok(())
}

fn print_output(output: &QueryOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", output.chart.title);
            println!();
            print_table(&output.table)?;
            if !output.notes.is_empty() {
                println!();
                for note in &output.notes {
                    println!("{note}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(output)?);
        }
        OutputFormat::Csv => mart_io::write_csv(&output.table, io::stdout())?,
    }
    Ok(())
}
