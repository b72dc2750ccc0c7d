use super::{DeclarationScope, PatchAnalyzer};
use crate::descriptor::patch_attributes;
use crate::diagnostics::{Finding, Rule};
use crate::fixes::add_class_patch_suggestion;

/// A method carries `HarmonyPatch` but its class does not.
pub struct MissingClassPatchAnalyzer;

impl PatchAnalyzer for MissingClassPatchAnalyzer {
    fn rule(&self) -> Rule {
        Rule::MissingClassPatch
    }

    fn analyze(&self, scope: &DeclarationScope<'_>) -> Option<Finding> {
        patch_attributes(&scope.method.attributes).next()?;
        let declaring_type = scope.model.containing_type_of(scope.method)?;
        if patch_attributes(&declaring_type.attributes).next().is_some() {
            return None;
        }

        let finding = Finding::new(self.rule());
        if !scope.suggest {
            return Some(finding);
        }
        Some(finding.with_suggestions(vec![add_class_patch_suggestion(scope.method)]))
    }
}
