use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mart", author, version, about = "Supermarket sales exploratory analysis", long_about = None)]
pub struct Cli {
    /// Set the logging level (defaults to the config file, then info)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Sales CSV to analyse
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the analysis pages
    Pages,
    /// List the questions offered on a page
    Questions {
        /// Page label, e.g. "Univariate Analysis"
        page: String,
    },
    /// Run one question and print its result
    Run {
        /// Page label
        page: String,
        /// Question label
        question: String,
        /// First day of the filter range (YYYY-MM-DD, filter page only)
        #[arg(long, value_parser = parse_day)]
        start: Option<NaiveDate>,
        /// Last day of the filter range (YYYY-MM-DD, filter page only)
        #[arg(long, value_parser = parse_day)]
        end: Option<NaiveDate>,
        /// City to keep; repeat for several (filter page only)
        #[arg(long = "city")]
        cities: Vec<String>,
        /// Output format (defaults to the config file, then table)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Also write the derived table to a .csv or .json file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Filter by date range and city and count product lines
    Filter {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long, value_parser = parse_day)]
        start: NaiveDate,
        /// Last day of the range (YYYY-MM-DD)
        #[arg(long, value_parser = parse_day)]
        end: NaiveDate,
        /// City to keep; repeat for several (defaults to every city)
        #[arg(long = "city")]
        cities: Vec<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Output format for query results.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-aligned table followed by notes
    #[default]
    Table,
    /// Full query output: table, chart instruction and notes
    Json,
    /// Comma-separated derived table
    Csv,
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got '{value}': {err}"))
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli_command().debug_assert();
    }

    #[test]
    fn run_collects_repeated_cities() {
        let cli = Cli::try_parse_from([
            "mart",
            "run",
            "Filter by Date & City",
            "Filtered Data",
            "--start",
            "2019-01-01",
            "--city",
            "Yangon",
            "--city",
            "Mandalay",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { start, cities, .. } => {
                assert_eq!(start, NaiveDate::from_ymd_opt(2019, 1, 1));
                assert_eq!(cities, vec!["Yangon", "Mandalay"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_non_iso_dates() {
        let err = Cli::try_parse_from([
            "mart", "filter", "--start", "01/05/2019", "--end", "2019-01-31",
        ]);
        assert!(err.is_err());
    }
}
