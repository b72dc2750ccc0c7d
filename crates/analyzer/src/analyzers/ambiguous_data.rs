use tracing::debug;

use super::{DeclarationScope, PatchAnalyzer};
use crate::descriptor::extract_from_symbol_with_inheritance;
use crate::diagnostics::{Finding, Rule};

/// The same descriptor field was supplied by several attributes at one level.
pub struct AmbiguousDataAnalyzer;

impl PatchAnalyzer for AmbiguousDataAnalyzer {
    fn rule(&self) -> Rule {
        Rule::AmbiguousData
    }

    fn analyze(&self, scope: &DeclarationScope<'_>) -> Option<Finding> {
        let data = extract_from_symbol_with_inheritance(scope.model, scope.method)?;
        let fields = data.ambiguous_fields();
        if fields.is_empty() {
            return None;
        }
        debug!(method = %scope.method.id, ?fields, "Ambiguous patch data");
        Some(Finding::new(self.rule()))
    }
}
