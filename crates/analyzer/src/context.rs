//! Resolving one method declaration to the member it patches.

use serde::Serialize;
use strum::Display;
use symbols::{MethodDeclaration, SemanticModel, SymbolId, TypeRef};
use tracing::debug;

use crate::ambiguous::Ambiguous;
use crate::descriptor::{MemberKind, PatchDescriptor, extract_from_symbol_with_inheritance};
use crate::matcher::get_fully_specified_candidates;
use crate::roles::{PatchRole, detect_role};

/// What a patch method resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchContext {
    pub target_type: TypeRef,
    /// `None` when nothing matched, ambiguous when several members did.
    pub target_method: Option<Ambiguous<SymbolId>>,
    pub role: PatchRole,
}

impl PatchContext {
    pub fn unique_target(&self) -> Option<&SymbolId> {
        self.target_method.as_ref().and_then(Ambiguous::unique)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnresolvedReason {
    /// Patch methods must be static.
    NotStatic,
    /// Neither the name nor an attribute says which role the method plays.
    UnknownRole,
    /// A descriptor field was supplied more than once.
    AmbiguousData,
    /// Target type or member name is missing.
    IncompleteTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Neither the method nor its class carries a patch attribute.
    NotAPatch,
    Unresolved { reason: UnresolvedReason },
    Resolved(PatchContext),
}

impl Resolution {
    pub fn context(&self) -> Option<&PatchContext> {
        match self {
            Resolution::Resolved(context) => Some(context),
            _ => None,
        }
    }
}

/// Runs the resolution steps for one declaration. Returns `None` when the
/// declaration is not bound to a symbol, in which case nothing can be said.
pub fn resolve_declaration(
    model: &SemanticModel,
    declaration: &MethodDeclaration,
) -> Option<Resolution> {
    let method = model.get_method(declaration.symbol.as_ref()?)?;

    if !declaration.is_static {
        return Some(unresolved(declaration, UnresolvedReason::NotStatic));
    }

    let role = detect_role(method);
    if role == PatchRole::Unknown {
        return Some(unresolved(declaration, UnresolvedReason::UnknownRole));
    }

    let Some(descriptor) = extract_from_symbol_with_inheritance(model, method) else {
        debug!(method = %method.id, "Not declared as a patch");
        return Some(Resolution::NotAPatch);
    };
    let descriptor = descriptor.with_default_kind();

    let resolution = match fully_specified(&descriptor) {
        Err(reason) => unresolved(declaration, reason),
        Ok((target_type, member_name, member_kind)) => {
            let arguments = descriptor.arguments.as_ref().and_then(Ambiguous::unique);
            let matches = get_fully_specified_candidates(
                model,
                target_type,
                member_name,
                *member_kind,
                arguments,
            );
            debug!(
                method = %method.id,
                target_type = %target_type,
                %member_name,
                matches = matches.len(),
                "Resolved patch target"
            );
            Resolution::Resolved(PatchContext {
                target_type: target_type.clone(),
                target_method: Ambiguous::from_sequence(matches.iter().map(|m| m.id.clone())),
                role,
            })
        }
    };
    Some(resolution)
}

type Target<'a> = (&'a TypeRef, &'a String, &'a MemberKind);

/// Unique type, name and kind, with arguments absent or unique. Defaults must
/// already be applied.
fn fully_specified(descriptor: &PatchDescriptor) -> Result<Target<'_>, UnresolvedReason> {
    if descriptor.is_ambiguous() {
        return Err(UnresolvedReason::AmbiguousData);
    }
    let target_type = descriptor.target_type.as_ref().and_then(Ambiguous::unique);
    let member_name = descriptor.member_name.as_ref().and_then(Ambiguous::unique);
    let member_kind = descriptor.member_kind.as_ref().and_then(Ambiguous::unique);
    match (target_type, member_name, member_kind) {
        (Some(target_type), Some(member_name), Some(member_kind)) => {
            Ok((target_type, member_name, member_kind))
        }
        _ => Err(UnresolvedReason::IncompleteTarget),
    }
}

fn unresolved(declaration: &MethodDeclaration, reason: UnresolvedReason) -> Resolution {
    debug!(
        declaration = %declaration.identifier,
        %reason,
        "Patch target left unresolved"
    );
    Resolution::Unresolved { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbols::RefKind;
    use testing::symbols::{ModelBuilder, TypeBuilder, patch};
    use tracing_test::traced_test;

    fn resolve(model: &SemanticModel, identifier: &str) -> Option<Resolution> {
        let declaration = model
            .declarations()
            .iter()
            .find(|d| d.identifier == identifier)
            .unwrap();
        resolve_declaration(model, declaration)
    }

    fn target() -> TypeBuilder {
        TypeBuilder::new("Game.Player")
            .method("Jump", |m| m)
            .method("Foo", |m| m)
            .method("Foo", |m| m.param("args", "System.String[]", RefKind::None))
    }

    #[test]
    #[traced_test]
    fn class_type_and_method_name_resolve_uniquely() {
        let model = ModelBuilder::new()
            .with_type(target())
            .with_type(
                TypeBuilder::new("Mod.JumpPatch")
                    .attribute(patch().target_type("Game.Player").build())
                    .method("Prefix", |m| {
                        m.static_method()
                            .attribute(patch().name("Jump").build())
                    }),
            )
            .declare_all()
            .build();

        let resolution = resolve(&model, "Prefix").unwrap();
        let context = resolution.context().unwrap();
        assert_eq!(context.role, PatchRole::Prefix);
        assert_eq!(context.target_type, TypeRef::new("Game.Player"));
        assert_eq!(
            context.unique_target(),
            Some(&SymbolId::new("M:Game.Player.Jump"))
        );
        assert!(logs_contain("Resolved patch target"));
    }

    #[test]
    fn overloads_without_arguments_resolve_ambiguously() {
        let model = ModelBuilder::new()
            .with_type(target())
            .with_type(
                TypeBuilder::new("Mod.FooPatch")
                    .attribute(patch().target_type("Game.Player").name("Foo").build())
                    .method("Postfix", |m| m.static_method()),
            )
            .declare_all()
            .build();

        let context = resolve(&model, "Postfix").unwrap();
        let target = context.context().unwrap().target_method.as_ref().unwrap();
        assert!(target.is_ambiguous());
        assert_eq!(target.len(), 2);
    }

    #[test]
    fn missing_member_resolves_with_no_target() {
        let model = ModelBuilder::new()
            .with_type(target())
            .with_type(
                TypeBuilder::new("Mod.Patch")
                    .attribute(patch().target_type("Game.Player").name("Fly").build())
                    .method("Prefix", |m| m.static_method()),
            )
            .declare_all()
            .build();

        let resolution = resolve(&model, "Prefix").unwrap();
        assert_eq!(resolution.context().unwrap().target_method, None);
    }

    #[test]
    fn ambiguous_or_missing_fields_stop_resolution() {
        let model = ModelBuilder::new()
            .with_type(target())
            .with_type(
                TypeBuilder::new("Mod.Patch")
                    .attribute(patch().target_type("Game.Player").build())
                    .attribute(patch().target_type("Game.Enemy").build())
                    .method("Prefix", |m| {
                        m.static_method().attribute(patch().name("Jump").build())
                    })
                    .method("Postfix", |m| m.static_method()),
            )
            .with_type(
                TypeBuilder::new("Mod.Unnamed")
                    .attribute(patch().target_type("Game.Player").build())
                    .method("Transpiler", |m| m.static_method()),
            )
            .declare_all()
            .build();

        assert_eq!(
            resolve(&model, "Prefix"),
            Some(Resolution::Unresolved {
                reason: UnresolvedReason::AmbiguousData
            })
        );
        assert_eq!(
            resolve(&model, "Transpiler"),
            Some(Resolution::Unresolved {
                reason: UnresolvedReason::IncompleteTarget
            })
        );
    }

    #[test]
    fn early_exits() {
        let model = ModelBuilder::new()
            .with_type(target())
            .with_type(
                TypeBuilder::new("Mod.Patch")
                    .attribute(patch().target_type("Game.Player").name("Jump").build())
                    .method("Prefix", |m| m)
                    .method("Helper", |m| m.static_method()),
            )
            .with_type(TypeBuilder::new("Mod.Plain").method("Postfix", |m| m.static_method()))
            .declare_all()
            .declare_unbound("Broken")
            .build();

        assert_eq!(
            resolve(&model, "Prefix"),
            Some(Resolution::Unresolved {
                reason: UnresolvedReason::NotStatic
            })
        );
        assert_eq!(
            resolve(&model, "Helper"),
            Some(Resolution::Unresolved {
                reason: UnresolvedReason::UnknownRole
            })
        );
        assert_eq!(resolve(&model, "Postfix"), Some(Resolution::NotAPatch));
        assert_eq!(resolve(&model, "Broken"), None);
    }
}
