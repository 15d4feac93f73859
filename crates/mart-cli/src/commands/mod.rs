pub mod completions;
pub mod filter;
pub mod pages;
pub mod run;

use std::io::{self, Write};

use anyhow::Result;
use mart_core::DerivedTable;
use tabwriter::TabWriter;

/// Prints `table` tab-aligned on stdout, header first.
pub fn print_table(table: &DerivedTable) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "{}", table.columns().join("\t"))?;
    for row in table.rows() {
        let cells: Vec<String> = row.iter().map(|cell| format!("{cell:.2}")).collect();
        writeln!(writer, "{}", cells.join("\t"))?;
    }
    writer.flush()?;
    Ok(())
}
