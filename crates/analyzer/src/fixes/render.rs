//! Turning descriptor data back into `HarmonyPatch` attribute applications.
//!
//! Rendering works on [`AttributeData`]; producing source text from it is left
//! to the host.

use serde::Serialize;
use symbols::{AttributeArgument, AttributeData, MethodSymbol, SymbolId, TypeRef};

use crate::ambiguous::Ambiguous;
use crate::descriptor::{
    ARGUMENT_TYPE_ENUM, ArgumentList, HARMONY_PATCH, METHOD_TYPE_ENUM, MemberKind, PatchDescriptor,
    SYSTEM_TYPE, extract_from_attribute,
};
use crate::matcher::MetadataChange;

/// The symbol whose attribute list an edit applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditTarget {
    Method { id: SymbolId },
    Type { name: TypeRef },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditAction {
    /// Append a new attribute.
    Add,
    /// Replace the attribute at `index` in the target's attribute list.
    Replace { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeEdit {
    pub target: EditTarget,
    pub action: EditAction,
    pub attribute: AttributeData,
}

impl AttributeEdit {
    pub fn add_to_method(method: &MethodSymbol, attribute: AttributeData) -> Self {
        Self {
            target: EditTarget::Method {
                id: method.id.clone(),
            },
            action: EditAction::Add,
            attribute,
        }
    }

    pub fn add_to_type(name: &TypeRef, attribute: AttributeData) -> Self {
        Self {
            target: EditTarget::Type { name: name.clone() },
            action: EditAction::Add,
            attribute,
        }
    }
}

/// A `HarmonyPatch` application with arguments in the order
/// type, name, kind, types, pass kinds.
///
/// No constructor takes a name, a kind and argument types together, so a
/// `Normal` kind is left implicit in that combination.
pub fn render_patch_attribute(
    target_type: Option<&TypeRef>,
    member_name: Option<&str>,
    member_kind: Option<MemberKind>,
    arguments: Option<&ArgumentList>,
) -> AttributeData {
    let member_kind = member_kind.filter(|kind| {
        *kind != MemberKind::Normal || member_name.is_none() || arguments.is_none()
    });
    let mut rendered = Vec::new();
    if let Some(ty) = target_type {
        rendered.push(AttributeArgument::type_of(ty.clone()));
    }
    if let Some(name) = member_name {
        rendered.push(AttributeArgument::string(name));
    }
    if let Some(kind) = member_kind {
        rendered.push(AttributeArgument::enum_constant(
            METHOD_TYPE_ENUM,
            kind.to_constant(),
        ));
    }
    if let Some(list) = arguments {
        rendered.push(AttributeArgument::array(
            SYSTEM_TYPE,
            list.types
                .iter()
                .map(|ty| AttributeArgument::type_of(ty.clone()))
                .collect(),
        ));
        if let Some(kinds) = &list.pass_kinds {
            rendered.push(AttributeArgument::array(
                ARGUMENT_TYPE_ENUM,
                kinds
                    .iter()
                    .map(|kind| AttributeArgument::enum_constant(ARGUMENT_TYPE_ENUM, kind.to_constant()))
                    .collect(),
            ));
        }
    }
    AttributeData::new(HARMONY_PATCH, rendered)
}

/// Renders a descriptor whose present fields are all unambiguous.
pub fn render_descriptor(descriptor: &PatchDescriptor) -> Option<AttributeData> {
    if descriptor.is_ambiguous() {
        return None;
    }
    Some(render_patch_attribute(
        descriptor.target_type.as_ref().and_then(Ambiguous::unique),
        descriptor
            .member_name
            .as_ref()
            .and_then(Ambiguous::unique)
            .map(String::as_str),
        descriptor
            .member_kind
            .as_ref()
            .and_then(Ambiguous::unique)
            .copied(),
        descriptor.arguments.as_ref().and_then(Ambiguous::unique),
    ))
}

/// A new attribute stating exactly the fields of `change`.
pub fn render_change(change: &MetadataChange) -> AttributeData {
    let arguments = change
        .arguments
        .as_deref()
        .map(ArgumentList::from_descriptors);
    render_patch_attribute(
        None,
        change.name.as_deref(),
        change.kind,
        arguments.as_ref(),
    )
}

/// The edit that applies `change` to `method`. The method's only patch
/// attribute is extended in place; with none or several, a new attribute is
/// added. When the extended attribute would match no constructor overload,
/// the fields the existing attribute lacks go into a new one instead.
pub fn retarget_edit(method: &MethodSymbol, change: &MetadataChange) -> AttributeEdit {
    let mut patches = method
        .attributes
        .iter()
        .enumerate()
        .filter(|(_, attr)| attr.is(HARMONY_PATCH));

    if let (Some((index, existing)), None) = (patches.next(), patches.next()) {
        let existing_data = extract_from_attribute(existing);
        // An argument list we could not read would be lost by re-rendering.
        if !existing_data.is_empty() || existing.arguments.is_empty() {
            let extended = extend_attribute(&existing_data, change);
            if is_readable(&extended) {
                return AttributeEdit {
                    target: EditTarget::Method {
                        id: method.id.clone(),
                    },
                    action: EditAction::Replace { index },
                    attribute: extended,
                };
            }
            return AttributeEdit::add_to_method(
                method,
                render_change(&missing_fields(&existing_data, change)),
            );
        }
    }

    AttributeEdit::add_to_method(method, render_change(change))
}

/// Whether extracting `attribute` gives back every argument it states.
fn is_readable(attribute: &AttributeData) -> bool {
    render_descriptor(&extract_from_attribute(attribute)).as_ref() == Some(attribute)
}

/// The part of `change` that `existing` does not state already. Stating a
/// field twice would make it ambiguous.
fn missing_fields(existing: &PatchDescriptor, change: &MetadataChange) -> MetadataChange {
    MetadataChange {
        name: change.name.clone().filter(|_| existing.member_name.is_none()),
        kind: change.kind.filter(|_| existing.member_kind.is_none()),
        arguments: change
            .arguments
            .clone()
            .filter(|_| existing.arguments.is_none()),
    }
}

fn extend_attribute(existing: &PatchDescriptor, change: &MetadataChange) -> AttributeData {
    let target_type = existing.target_type.as_ref().and_then(Ambiguous::unique);
    let member_name = existing
        .member_name
        .as_ref()
        .and_then(Ambiguous::unique)
        .map(String::as_str)
        .or(change.name.as_deref());
    let member_kind = existing
        .member_kind
        .as_ref()
        .and_then(Ambiguous::unique)
        .copied()
        .or(change.kind);

    let new_arguments = change
        .arguments
        .as_deref()
        .map(ArgumentList::from_descriptors);
    let arguments = match (
        existing.arguments.as_ref().and_then(Ambiguous::unique),
        new_arguments,
    ) {
        // Types were written without pass kinds and the change needs them.
        (Some(current), Some(new)) if current.pass_kinds.is_none() && new.pass_kinds.is_some() => {
            Some(ArgumentList::new(current.types.clone(), new.pass_kinds))
        }
        (Some(current), _) => Some(current.clone()),
        (None, new) => new,
    };

    render_patch_attribute(target_type, member_name, member_kind, arguments.as_ref())
}
