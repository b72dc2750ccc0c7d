//! Runs every enabled analyzer over every declaration of a model on a
//! dedicated worker pool.

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use symbols::{MethodDeclaration, SemanticModel};
use tracing::{info, warn};

use crate::analyzers::{PatchAnalyzer, all_analyzers, analyze_declaration};
use crate::config::AnalyzerConfig;
use crate::diagnostics::{Diagnostic, Finding, Severity};
use crate::errors::{AnalysisError, Result};

/// Shared stop signal. Checked between declarations, never inside one.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub declarations_analyzed: usize,
    /// In declaration order, then analyzer order.
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

pub struct Analyzer {
    config: AnalyzerConfig,
    analyzers: Vec<Box<dyn PatchAnalyzer>>,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_analyzers(config, all_analyzers())
    }

    /// Analyzers whose rule is turned off in `config` are dropped here.
    pub fn with_analyzers(config: AnalyzerConfig, analyzers: Vec<Box<dyn PatchAnalyzer>>) -> Self {
        let analyzers = analyzers
            .into_iter()
            .filter(|analyzer| config.is_enabled(analyzer.rule()))
            .collect();
        Self { config, analyzers }
    }

    pub fn analyze_model(
        &self,
        model: &SemanticModel,
        cancellation: &CancellationFlag,
    ) -> Result<AnalysisReport> {
        check_cancellation(cancellation, "before starting")?;
        let start_time = Instant::now();
        let threads = self.config.effective_threads();

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("harmonize-worker-{index}"))
            .build()?;

        let per_declaration: Option<Vec<Vec<Diagnostic>>> = pool.install(|| {
            model
                .declarations()
                .par_iter()
                .map(|declaration| {
                    if cancellation.is_cancelled() {
                        return None;
                    }
                    Some(self.analyze_declaration(model, declaration))
                })
                .collect()
        });

        let Some(per_declaration) = per_declaration else {
            warn!("Analysis cancelled while analyzing declarations");
            return Err(AnalysisError::Cancelled("during declaration analysis"));
        };

        let report = AnalysisReport {
            declarations_analyzed: per_declaration.len(),
            diagnostics: per_declaration.into_iter().flatten().collect(),
        };
        info!(
            declarations = report.declarations_analyzed,
            diagnostics = report.diagnostics.len(),
            errors = report.count(Severity::Error),
            warnings = report.count(Severity::Warning),
            threads,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Analysis finished"
        );
        Ok(report)
    }

    /// Diagnostics for one declaration with configured severities applied.
    pub fn analyze_declaration(
        &self,
        model: &SemanticModel,
        declaration: &MethodDeclaration,
    ) -> Vec<Diagnostic> {
        analyze_declaration(
            model,
            declaration,
            &self.analyzers,
            self.config.suggestions.enabled,
        )
        .into_iter()
        .filter_map(|finding| self.report(declaration, finding))
        .collect()
    }

    fn report(&self, declaration: &MethodDeclaration, finding: Finding) -> Option<Diagnostic> {
        let severity = self.config.severity_for(finding.rule)?;
        let mut suggestions = finding.suggestions;
        let limit = self.config.suggestions.max_per_diagnostic;
        if limit > 0 {
            suggestions.truncate(limit);
        }
        Some(Diagnostic {
            rule: finding.rule,
            severity,
            message: finding.rule.format_message(&finding.arguments),
            location: declaration.location.clone(),
            declaration: declaration.identifier.clone(),
            symbol: declaration.symbol.clone(),
            suggestions,
        })
    }
}

pub(crate) fn check_cancellation(cancellation: &CancellationFlag, stage: &'static str) -> Result<()> {
    if cancellation.is_cancelled() {
        return Err(AnalysisError::Cancelled(stage));
    }
    Ok(())
}
