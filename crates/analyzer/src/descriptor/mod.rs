//! Canonical view of the target data a `HarmonyPatch` attribute conveys.
//!
//! Extraction (`extract`) turns a single attribute application into a
//! [`PatchDescriptor`]; merging (`merge`) folds descriptors from several
//! attribute applications and from the class/method levels into one.

mod extract;
mod merge;

pub use extract::{
    extract_from_attribute, extract_from_attributes, extract_from_symbol_with_inheritance,
    patch_attributes,
};

use serde::Serialize;
use symbols::{RefKind, TypeRef};

use crate::ambiguous::Ambiguous;

pub const HARMONY_PATCH: &str = "HarmonyLib.HarmonyPatch";
pub const METHOD_TYPE_ENUM: &str = "HarmonyLib.MethodType";
pub const ARGUMENT_TYPE_ENUM: &str = "HarmonyLib.ArgumentType";
pub const SYSTEM_TYPE: &str = "System.Type";

/// Which callable of a member a patch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MemberKind {
    Normal,
    Getter,
    Setter,
    Unsupported,
}

impl MemberKind {
    pub const ALL: [MemberKind; 4] = [
        MemberKind::Normal,
        MemberKind::Getter,
        MemberKind::Setter,
        MemberKind::Unsupported,
    ];

    /// Maps a `HarmonyLib.MethodType` constant.
    pub fn from_constant(value: i64) -> Self {
        match lookup(METHOD_TYPE_CONSTANTS, value) {
            Some("Normal") => MemberKind::Normal,
            Some("Getter") => MemberKind::Getter,
            Some("Setter") => MemberKind::Setter,
            _ => MemberKind::Unsupported,
        }
    }

    /// The `HarmonyLib.MethodType` constant this kind is written as.
    /// `Unsupported` has no single spelling and renders as `Normal`.
    pub fn to_constant(self) -> i64 {
        let name = match self {
            MemberKind::Getter => "Getter",
            MemberKind::Setter => "Setter",
            MemberKind::Normal | MemberKind::Unsupported => "Normal",
        };
        constant_of(METHOD_TYPE_CONSTANTS, name)
    }
}

/// How a target parameter is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PassKind {
    Normal,
    Out,
    Ref,
    Unsupported,
}

impl PassKind {
    /// Maps a `HarmonyLib.ArgumentType` constant.
    pub fn from_constant(value: i64) -> Self {
        match lookup(ARGUMENT_TYPE_CONSTANTS, value) {
            Some("Normal") => PassKind::Normal,
            Some("Out") => PassKind::Out,
            Some("Ref") => PassKind::Ref,
            _ => PassKind::Unsupported,
        }
    }

    pub fn to_constant(self) -> i64 {
        let name = match self {
            PassKind::Out => "Out",
            PassKind::Ref => "Ref",
            PassKind::Normal | PassKind::Unsupported => "Normal",
        };
        constant_of(ARGUMENT_TYPE_CONSTANTS, name)
    }

    pub fn from_ref_kind(ref_kind: RefKind) -> Self {
        match ref_kind {
            RefKind::None => PassKind::Normal,
            RefKind::Ref => PassKind::Ref,
            RefKind::Out => PassKind::Out,
            RefKind::In => PassKind::Unsupported,
        }
    }

    /// Whether a parameter passed as `ref_kind` satisfies this pass kind.
    pub fn accepts(self, ref_kind: RefKind) -> bool {
        match self {
            PassKind::Normal => ref_kind == RefKind::None,
            PassKind::Out => ref_kind == RefKind::Out,
            PassKind::Ref => ref_kind == RefKind::Ref,
            PassKind::Unsupported => false,
        }
    }
}

/// `HarmonyLib.MethodType` members and their values.
const METHOD_TYPE_CONSTANTS: &[(i64, &str)] = &[
    (0, "Normal"),
    (1, "Getter"),
    (2, "Setter"),
    (3, "Constructor"),
    (4, "StaticConstructor"),
    (5, "Enumerator"),
    (6, "Async"),
];

/// `HarmonyLib.ArgumentType` members and their values.
const ARGUMENT_TYPE_CONSTANTS: &[(i64, &str)] =
    &[(0, "Normal"), (1, "Ref"), (2, "Out"), (3, "Pointer")];

fn lookup(table: &[(i64, &'static str)], value: i64) -> Option<&'static str> {
    table
        .iter()
        .find(|(constant, _)| *constant == value)
        .map(|(_, name)| *name)
}

fn constant_of(table: &[(i64, &str)], name: &str) -> i64 {
    table
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(constant, _)| *constant)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArgumentDescriptor {
    pub ty: TypeRef,
    /// `None` matches a parameter passed any way.
    pub pass_kind: Option<PassKind>,
}

impl ArgumentDescriptor {
    pub fn new(ty: impl Into<TypeRef>, pass_kind: Option<PassKind>) -> Self {
        Self {
            ty: ty.into(),
            pass_kind,
        }
    }
}

/// The `(Type[], ArgumentType[]?)` pair exactly as an attribute writes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArgumentList {
    pub types: Vec<TypeRef>,
    pub pass_kinds: Option<Vec<PassKind>>,
}

impl ArgumentList {
    pub fn new(types: Vec<TypeRef>, pass_kinds: Option<Vec<PassKind>>) -> Self {
        Self { types, pass_kinds }
    }

    pub fn from_descriptors(descriptors: &[ArgumentDescriptor]) -> Self {
        let types = descriptors.iter().map(|d| d.ty.clone()).collect();
        let pass_kinds = descriptors
            .iter()
            .any(|d| d.pass_kind.is_some())
            .then(|| {
                descriptors
                    .iter()
                    .map(|d| d.pass_kind.unwrap_or(PassKind::Normal))
                    .collect()
            });
        Self { types, pass_kinds }
    }

    /// Aligned per-parameter descriptors, or `None` when the pass-kind array
    /// has a different length than the type array.
    pub fn descriptors(&self) -> Option<Vec<ArgumentDescriptor>> {
        match &self.pass_kinds {
            None => Some(
                self.types
                    .iter()
                    .map(|ty| ArgumentDescriptor::new(ty.clone(), None))
                    .collect(),
            ),
            Some(kinds) if kinds.len() == self.types.len() => Some(
                self.types
                    .iter()
                    .zip(kinds)
                    .map(|(ty, kind)| ArgumentDescriptor::new(ty.clone(), Some(*kind)))
                    .collect(),
            ),
            Some(_) => None,
        }
    }
}

/// Descriptor fields, used to name ambiguous data in findings and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorField {
    TargetType,
    MemberName,
    MemberKind,
    Arguments,
}

/// Target data asserted by one attribute, or by several merged together.
/// Every field is independently absent, known, or ambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchDescriptor {
    pub target_type: Option<Ambiguous<TypeRef>>,
    pub member_name: Option<Ambiguous<String>>,
    pub member_kind: Option<Ambiguous<MemberKind>>,
    pub arguments: Option<Ambiguous<ArgumentList>>,
}

impl PatchDescriptor {
    pub fn is_empty(&self) -> bool {
        self.target_type.is_none()
            && self.member_name.is_none()
            && self.member_kind.is_none()
            && self.arguments.is_none()
    }

    pub fn ambiguous_fields(&self) -> Vec<DescriptorField> {
        let mut fields = Vec::new();
        if self.target_type.as_ref().is_some_and(Ambiguous::is_ambiguous) {
            fields.push(DescriptorField::TargetType);
        }
        if self.member_name.as_ref().is_some_and(Ambiguous::is_ambiguous) {
            fields.push(DescriptorField::MemberName);
        }
        if self.member_kind.as_ref().is_some_and(Ambiguous::is_ambiguous) {
            fields.push(DescriptorField::MemberKind);
        }
        if self.arguments.as_ref().is_some_and(Ambiguous::is_ambiguous) {
            fields.push(DescriptorField::Arguments);
        }
        fields
    }

    pub fn is_ambiguous(&self) -> bool {
        !self.ambiguous_fields().is_empty()
    }

    /// Member kind defaults to `Normal` when no attribute states it.
    pub fn with_default_kind(mut self) -> Self {
        if self.member_kind.is_none() {
            self.member_kind = Some(Ambiguous::single(MemberKind::Normal));
        }
        self
    }

    pub fn unique_target_type(&self) -> Option<&TypeRef> {
        self.target_type.as_ref().and_then(Ambiguous::unique)
    }
}
