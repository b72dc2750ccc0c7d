//! Which interception phase a patch method implements, and which methods of
//! a patch class are not patches at all.

use serde::Serialize;
use smallvec::SmallVec;
use strum::Display;
use symbols::{MethodSymbol, SemanticModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum PatchRole {
    Unknown,
    Prefix,
    Postfix,
    Transpiler,
}

impl PatchRole {
    /// Roles a patch can actually take, in the order fixes offer them.
    pub const KNOWN: [PatchRole; 3] = [PatchRole::Prefix, PatchRole::Postfix, PatchRole::Transpiler];

    /// The marker attribute that assigns this role.
    pub fn attribute_class(self) -> Option<&'static str> {
        match self {
            PatchRole::Unknown => None,
            PatchRole::Prefix => Some("HarmonyLib.HarmonyPrefix"),
            PatchRole::Postfix => Some("HarmonyLib.HarmonyPostfix"),
            PatchRole::Transpiler => Some("HarmonyLib.HarmonyTranspiler"),
        }
    }

    fn from_method_name(name: &str) -> Option<Self> {
        match name {
            "Prefix" => Some(PatchRole::Prefix),
            "Postfix" => Some(PatchRole::Postfix),
            "Transpiler" => Some(PatchRole::Transpiler),
            _ => None,
        }
    }

    fn from_attribute_class(class: &str) -> Option<Self> {
        Self::KNOWN
            .into_iter()
            .find(|role| role.attribute_class() == Some(class))
    }
}

/// The role the framework will apply: the method name convention wins, then
/// the first role attribute in declaration order.
pub fn detect_role(method: &MethodSymbol) -> PatchRole {
    PatchRole::from_method_name(&method.name)
        .or_else(|| {
            method
                .attributes
                .iter()
                .find_map(|attr| PatchRole::from_attribute_class(&attr.class))
        })
        .unwrap_or(PatchRole::Unknown)
}

/// Every role implied by the name or any role attribute, without duplicates.
pub fn role_candidates(method: &MethodSymbol) -> SmallVec<[PatchRole; 2]> {
    let mut roles: SmallVec<[PatchRole; 2]> = SmallVec::new();
    let implied = PatchRole::from_method_name(&method.name).into_iter().chain(
        method
            .attributes
            .iter()
            .filter_map(|attr| PatchRole::from_attribute_class(&attr.class)),
    );
    for role in implied {
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    roles
}

/// The role when exactly one is implied, `Unknown` when none or several are.
pub fn classified_role(method: &MethodSymbol) -> PatchRole {
    match role_candidates(method).as_slice() {
        [role] => *role,
        _ => PatchRole::Unknown,
    }
}

const AUXILIARY_METHODS: &[(&str, &str)] = &[
    ("Prepare", "HarmonyLib.HarmonyPrepare"),
    ("TargetMethod", "HarmonyLib.HarmonyTargetMethod"),
    ("TargetMethods", "HarmonyLib.HarmonyTargetMethods"),
    ("Cleanup", "HarmonyLib.HarmonyCleanup"),
];

/// Lifecycle hooks of a patch class (`Prepare`, `TargetMethod(s)`, `Cleanup`)
/// recognized by name or attribute.
pub fn is_auxiliary_method(method: &MethodSymbol) -> bool {
    AUXILIARY_METHODS
        .iter()
        .any(|(name, class)| method.name == *name || method.has_attribute(class))
}

/// Whether another method of the same type calls `method`. Calls from other
/// types are not visible here.
pub fn is_invoked_within_declaring_type(model: &SemanticModel, method: &MethodSymbol) -> bool {
    let Some(declaring_type) = model.containing_type_of(method) else {
        return false;
    };
    declaring_type
        .methods()
        .filter(|caller| caller.id != method.id)
        .any(|caller| caller.invocations.contains(&method.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::symbols::{MethodBuilder, ModelBuilder, TypeBuilder};

    fn method(build: impl FnOnce(MethodBuilder) -> MethodBuilder) -> MethodSymbol {
        build(MethodBuilder::new("Mod.Patches", "Patch")).build()
    }

    #[test]
    fn name_convention_wins_over_attributes() {
        let m = build_named("Postfix", &["HarmonyLib.HarmonyPrefix"]);
        assert_eq!(detect_role(&m), PatchRole::Postfix);
        assert_eq!(classified_role(&m), PatchRole::Unknown);
    }

    #[test]
    fn first_role_attribute_is_used() {
        let m = method(|m| {
            m.marker("HarmonyLib.HarmonyTranspiler")
                .marker("HarmonyLib.HarmonyPrefix")
        });
        assert_eq!(detect_role(&m), PatchRole::Transpiler);
        assert_eq!(
            role_candidates(&m).as_slice(),
            &[PatchRole::Transpiler, PatchRole::Prefix]
        );
    }

    #[test]
    fn consistent_name_and_attribute_classify() {
        let m = build_named("Prefix", &["HarmonyLib.HarmonyPrefix"]);
        assert_eq!(classified_role(&m), PatchRole::Prefix);
        assert_eq!(classified_role(&method(|m| m)), PatchRole::Unknown);
    }

    #[test]
    fn auxiliary_methods_by_name_or_attribute() {
        assert!(is_auxiliary_method(&build_named("TargetMethods", &[])));
        assert!(is_auxiliary_method(&method(|m| m.marker("HarmonyLib.HarmonyCleanup"))));
        assert!(!is_auxiliary_method(&method(|m| m)));
    }

    #[test]
    fn helper_invocations_are_found_in_the_same_type() {
        let model = ModelBuilder::new()
            .with_type(
                TypeBuilder::new("Mod.Patches")
                    .method("Helper", |m| m.static_method())
                    .method("Prefix", |m| {
                        m.static_method().invokes("M:Mod.Patches.Helper")
                    })
                    .method("Recursive", |m| {
                        m.static_method().invokes("M:Mod.Patches.Recursive")
                    }),
            )
            .build();
        let ty = model.types()[0].clone();
        let helper = ty.methods().find(|m| m.name == "Helper").unwrap();
        let recursive = ty.methods().find(|m| m.name == "Recursive").unwrap();
        let prefix = ty.methods().find(|m| m.name == "Prefix").unwrap();

        assert!(is_invoked_within_declaring_type(&model, helper));
        assert!(!is_invoked_within_declaring_type(&model, recursive));
        assert!(!is_invoked_within_declaring_type(&model, prefix));
    }

    fn build_named(name: &str, attributes: &[&str]) -> MethodSymbol {
        attributes
            .iter()
            .fold(MethodBuilder::new("Mod.Patches", name), |m, class| m.marker(class))
            .build()
    }
}
