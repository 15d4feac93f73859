use std::io::IsTerminal;
use std::process;

use anyhow::Result;
use clap::Parser;
use mart_cli::{Cli, Commands, MartConfig};
use mart_io::DatasetHandle;
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::run::RunRequest;

fn main() {
    let cli = Cli::parse();

    let settings = MartConfig::load(cli.config.as_deref()).and_then(|config| {
        let level = match cli.log_level {
            Some(level) => level,
            None => config.log_level()?,
        };
        Ok((config, level))
    });
    let level = settings
        .as_ref()
        .map(|(_, level)| *level)
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: a tracing subscriber was already installed");
    }

    let result = settings.and_then(|(config, _)| dispatch(&cli, &config));
    if let Err(err) = result {
        error!("{err:#}");
        process::exit(1);
    }
}

fn dispatch(cli: &Cli, config: &MartConfig) -> Result<()> {
    let data = cli.data.clone().unwrap_or_else(|| config.data.path.clone());
    debug!(data = %data.display(), "resolved dataset path");
    let handle = DatasetHandle::new(data);

    match &cli.command {
        Commands::Pages => commands::pages::handle_pages(),
        Commands::Questions { page } => commands::pages::handle_questions(page),
        Commands::Run {
            page,
            question,
            start,
            end,
            cities,
            format,
            out,
        } => {
            let request = RunRequest {
                page,
                question,
                start: *start,
                end: *end,
                cities,
            };
            let format = format.unwrap_or(config.output.format);
            commands::run::handle(&handle, &request, format, out.as_deref())
        }
        Commands::Filter { start, end, cities } => {
            commands::filter::handle(&handle, *start, *end, cities)
        }
        Commands::Completions { shell, out } => {
            commands::completions::handle(*shell, out.as_deref())
        }
    }
}
