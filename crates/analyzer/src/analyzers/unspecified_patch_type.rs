use super::{DeclarationScope, PatchAnalyzer};
use crate::descriptor::extract_from_symbol_with_inheritance;
use crate::diagnostics::{Finding, Rule};
use crate::fixes::apply_role_suggestions;
use crate::roles::{
    PatchRole, classified_role, is_auxiliary_method, is_invoked_within_declaring_type,
};

/// A method of a patch class implies no role, or conflicting ones.
pub struct UnspecifiedPatchTypeAnalyzer;

impl PatchAnalyzer for UnspecifiedPatchTypeAnalyzer {
    fn rule(&self) -> Rule {
        Rule::UnspecifiedPatchType
    }

    fn analyze(&self, scope: &DeclarationScope<'_>) -> Option<Finding> {
        extract_from_symbol_with_inheritance(scope.model, scope.method)?;
        if classified_role(scope.method) != PatchRole::Unknown
            || is_auxiliary_method(scope.method)
        {
            return None;
        }
        // Helpers called from the patch methods are not patches themselves.
        if is_invoked_within_declaring_type(scope.model, scope.method) {
            return None;
        }

        let finding = Finding::new(self.rule());
        if !scope.suggest {
            return Some(finding);
        }
        Some(finding.with_suggestions(apply_role_suggestions(scope.method)))
    }
}
