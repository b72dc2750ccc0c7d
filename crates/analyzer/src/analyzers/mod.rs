//! One analyzer per rule. Each looks at a single declaration and reports at
//! most one finding for it.

mod ambiguous_data;
mod ambiguous_target;
mod missing_class_patch;
mod unspecified_patch_type;

pub use ambiguous_data::AmbiguousDataAnalyzer;
pub use ambiguous_target::AmbiguousTargetAnalyzer;
pub use missing_class_patch::MissingClassPatchAnalyzer;
pub use unspecified_patch_type::UnspecifiedPatchTypeAnalyzer;

use symbols::{MethodDeclaration, MethodSymbol, SemanticModel};

use crate::diagnostics::{Finding, Rule};

/// A declaration bound to its method symbol.
pub struct DeclarationScope<'m> {
    pub model: &'m SemanticModel,
    pub declaration: &'m MethodDeclaration,
    pub method: &'m MethodSymbol,
    /// Whether analyzers should compute fix suggestions.
    pub suggest: bool,
}

impl<'m> DeclarationScope<'m> {
    /// `None` for declarations the front-end could not bind to a symbol.
    pub fn new(model: &'m SemanticModel, declaration: &'m MethodDeclaration) -> Option<Self> {
        let method = model.get_method(declaration.symbol.as_ref()?)?;
        Some(Self {
            model,
            declaration,
            method,
            suggest: true,
        })
    }

    pub fn with_suggestions(mut self, suggest: bool) -> Self {
        self.suggest = suggest;
        self
    }
}

pub trait PatchAnalyzer: Send + Sync {
    fn rule(&self) -> Rule;
    fn analyze(&self, scope: &DeclarationScope<'_>) -> Option<Finding>;
}

/// Every analyzer, in rule id order.
pub fn all_analyzers() -> Vec<Box<dyn PatchAnalyzer>> {
    vec![
        Box::new(AmbiguousTargetAnalyzer),
        Box::new(AmbiguousDataAnalyzer),
        Box::new(MissingClassPatchAnalyzer),
        Box::new(UnspecifiedPatchTypeAnalyzer),
    ]
}

/// Findings of `analyzers` for one declaration, in analyzer order.
pub fn analyze_declaration(
    model: &SemanticModel,
    declaration: &MethodDeclaration,
    analyzers: &[Box<dyn PatchAnalyzer>],
    suggest: bool,
) -> Vec<Finding> {
    let Some(scope) = DeclarationScope::new(model, declaration) else {
        return Vec::new();
    };
    let scope = scope.with_suggestions(suggest);
    analyzers
        .iter()
        .filter_map(|analyzer| analyzer.analyze(&scope))
        .collect()
}
