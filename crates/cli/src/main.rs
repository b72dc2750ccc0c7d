mod cli;
mod commands;

use crate::cli::{Commands, HarmonizeCli, OutputFormat};
use anyhow::Result;
use logging::LogMode;
use std::process;

fn log_mode(format: OutputFormat, log_file: Option<std::path::PathBuf>) -> LogMode {
    match (log_file, format) {
        (Some(path), _) => LogMode::File(path),
        (None, OutputFormat::Json) => LogMode::Json,
        (None, OutputFormat::Text) => LogMode::Cli,
    }
}

fn main() -> Result<()> {
    let cli = HarmonizeCli::parse_args();

    match cli.command {
        Commands::Analyze {
            model,
            config,
            format,
            threads,
            verbose,
            log_file,
        } => {
            let guards = logging::init(log_mode(format, log_file), verbose)?;
            let has_errors = commands::analyze::run(commands::analyze::AnalyzeArgs {
                model,
                config,
                format,
                threads,
            })?;
            // Flush background log writers before exiting with a status.
            drop(guards);
            if has_errors {
                process::exit(1);
            }
            Ok(())
        }
        Commands::Resolve {
            model,
            symbol,
            format,
            verbose,
        } => {
            let _guards = logging::init(log_mode(format, None), verbose)?;
            commands::resolve::run(&model, &symbol, format)
        }
        Commands::Rules { config, format } => commands::rules::run(config.as_deref(), format),
    }
}
