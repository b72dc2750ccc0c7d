//! # Analyzer
//!
//! Works out which member a `HarmonyPatch`-annotated method will patch and
//! reports declarations whose target or role cannot be determined.
//!
//! The pipeline for one declaration is: extract a [`descriptor::PatchDescriptor`]
//! from the method's and class's attributes, merge the two levels, match the
//! result against the members of the target type, and hand what is left to the
//! [`analyzers`]. [`runner::Analyzer`] does this for a whole model in parallel.

pub mod ambiguous;
pub mod analyzers;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod diagnostics;
pub mod errors;
pub mod fixes;
pub mod matcher;
pub mod roles;
pub mod runner;
pub mod simplifier;

pub use ambiguous::Ambiguous;
pub use config::AnalyzerConfig;
pub use context::{PatchContext, Resolution, UnresolvedReason, resolve_declaration};
pub use diagnostics::{Diagnostic, Rule, Severity};
pub use errors::{AnalysisError, ConfigError, Result};
pub use runner::{AnalysisReport, Analyzer, CancellationFlag};
