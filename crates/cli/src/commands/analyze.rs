use analyzer::diagnostics::Severity;
use analyzer::{AnalysisError, AnalysisReport, Analyzer, CancellationFlag};
use anyhow::{Result, bail};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use super::{load_config, load_model};
use crate::cli::OutputFormat;

pub struct AnalyzeArgs {
    pub model: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub threads: Option<usize>,
}

/// Prints the report to stdout. Returns whether any error-severity
/// diagnostic was reported.
pub fn run(args: AnalyzeArgs) -> Result<bool> {
    let model = load_model(&args.model)?;
    let mut config = load_config(args.config.as_deref(), Some(args.model.as_path()))?;
    if let Some(threads) = args.threads {
        config = config.with_worker_threads(threads);
    }
    info!(
        "Analyzing {} declarations from {}",
        model.declarations().len(),
        args.model.display()
    );

    let cancellation = CancellationFlag::new();
    let handler_flag = cancellation.clone();
    ctrlc::set_handler(move || {
        warn!("Interrupt received, stopping analysis");
        handler_flag.cancel();
    })?;

    let report = match Analyzer::new(config).analyze_model(&model, &cancellation) {
        Ok(report) => report,
        Err(AnalysisError::Cancelled(stage)) => bail!("Analysis interrupted {stage}"),
        Err(e) => return Err(e.into()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => write_text(&report, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(report.has_errors())
}

pub fn write_text(report: &AnalysisReport, out: &mut impl Write) -> io::Result<()> {
    for diagnostic in &report.diagnostics {
        writeln!(
            out,
            "{}: {}[{}]: {}",
            diagnostic.location,
            diagnostic.severity.as_str(),
            diagnostic.id(),
            diagnostic.message
        )?;
        for suggestion in &diagnostic.suggestions {
            writeln!(out, "    fix: {}", suggestion.title)?;
        }
    }
    writeln!(
        out,
        "{} declarations analyzed: {} errors, {} warnings, {} infos",
        report.declarations_analyzed,
        report.count(Severity::Error),
        report.count(Severity::Warning),
        report.count(Severity::Info)
    )
}
