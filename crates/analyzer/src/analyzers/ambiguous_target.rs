use super::{DeclarationScope, PatchAnalyzer};
use crate::context::resolve_declaration;
use crate::diagnostics::{Finding, Rule};
use crate::fixes::retarget_suggestions;

/// The patch data is complete but selects no member, or several.
pub struct AmbiguousTargetAnalyzer;

impl PatchAnalyzer for AmbiguousTargetAnalyzer {
    fn rule(&self) -> Rule {
        Rule::AmbiguousTarget
    }

    fn analyze(&self, scope: &DeclarationScope<'_>) -> Option<Finding> {
        let resolution = resolve_declaration(scope.model, scope.declaration)?;
        let context = resolution.context()?;
        if context.unique_target().is_some() {
            return None;
        }

        let finding =
            Finding::new(self.rule()).with_argument(scope.declaration.identifier.as_str());
        if !scope.suggest {
            return Some(finding);
        }
        Some(finding.with_suggestions(retarget_suggestions(scope.model, scope.method)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbols::RefKind;
    use testing::symbols::{ModelBuilder, TypeBuilder, patch};

    fn analyze(name: &str) -> Option<Finding> {
        let model = ModelBuilder::new()
            .with_type(
                TypeBuilder::new("Game.Player")
                    .method("Jump", |m| m)
                    .method("Foo", |m| m)
                    .method("Foo", |m| m.param("args", "System.String[]", RefKind::None)),
            )
            .with_type(
                TypeBuilder::new("Mod.Patch")
                    .attribute(patch().target_type("Game.Player").name(name).build())
                    .method("Prefix", |m| m.static_method()),
            )
            .declare_all()
            .build();
        let declaration = model
            .declarations()
            .iter()
            .find(|d| d.identifier == "Prefix")
            .unwrap();
        let scope = DeclarationScope::new(&model, declaration).unwrap();
        AmbiguousTargetAnalyzer.analyze(&scope)
    }

    #[test]
    fn unique_target_is_not_reported() {
        assert_eq!(analyze("Jump"), None);
    }

    #[test]
    fn overloads_are_reported_with_one_fix_each() {
        let finding = analyze("Foo").unwrap();
        assert_eq!(finding.rule, Rule::AmbiguousTarget);
        assert_eq!(finding.arguments, vec!["Prefix".to_string()]);
        assert_eq!(finding.suggestions.len(), 2);
    }

    #[test]
    fn missing_member_is_reported_without_fixes() {
        let finding = analyze("Fly").unwrap();
        assert!(finding.suggestions.is_empty());
    }
}
