//! Suggested fixes attached to findings.

pub mod render;

use serde::Serialize;
use symbols::{AttributeData, MethodSymbol, SemanticModel, SymbolId};
use tracing::debug;

use crate::descriptor::{HARMONY_PATCH, extract_from_symbol_with_inheritance};
use crate::matcher::{MetadataChange, get_candidates};
use crate::roles::{PatchRole, role_candidates};

pub use render::{
    AttributeEdit, EditAction, EditTarget, render_change, render_descriptor,
    render_patch_attribute, retarget_edit,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub title: String,
    /// Identifies equivalent fixes across diagnostics, for fix-all.
    pub equivalence_key: String,
    pub fix: Fix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fix {
    /// Add the metadata that selects `candidate`.
    Retarget {
        candidate: SymbolId,
        change: MetadataChange,
        edit: AttributeEdit,
    },
    AddClassPatch {
        edit: AttributeEdit,
    },
    ApplyRole {
        role: PatchRole,
        edit: AttributeEdit,
    },
}

impl Fix {
    pub fn edit(&self) -> &AttributeEdit {
        match self {
            Fix::Retarget { edit, .. } | Fix::AddClassPatch { edit } | Fix::ApplyRole { edit, .. } => {
                edit
            }
        }
    }
}

/// One suggestion per member the patch could be pointed at. Nothing is
/// suggested unless the inherited data names a single target type.
pub fn retarget_suggestions(model: &SemanticModel, method: &MethodSymbol) -> Vec<Suggestion> {
    let Some(data) = extract_from_symbol_with_inheritance(model, method) else {
        return Vec::new();
    };
    let Some(target_type) = data.unique_target_type() else {
        return Vec::new();
    };

    let candidates = get_candidates(
        model,
        target_type,
        data.member_name.as_ref(),
        data.member_kind.as_ref(),
        data.arguments.as_ref(),
    );
    debug!(
        method = %method.id,
        candidates = candidates.len(),
        "Generated retarget suggestions"
    );

    candidates
        .into_iter()
        .map(|candidate| Suggestion {
            title: format!("Target '{}'", candidate.method.display_short()),
            equivalence_key: candidate.method.display_qualified(),
            fix: Fix::Retarget {
                candidate: candidate.method.id.clone(),
                edit: retarget_edit(method, &candidate.change),
                change: candidate.change,
            },
        })
        .collect()
}

pub const ADD_CLASS_PATCH_TITLE: &str = "Add HarmonyPatch attribute";

pub fn add_class_patch_suggestion(method: &MethodSymbol) -> Suggestion {
    Suggestion {
        title: ADD_CLASS_PATCH_TITLE.to_string(),
        equivalence_key: ADD_CLASS_PATCH_TITLE.to_string(),
        fix: Fix::AddClassPatch {
            edit: AttributeEdit::add_to_type(
                &method.containing_type,
                AttributeData::new(HARMONY_PATCH, vec![]),
            ),
        },
    }
}

/// One suggestion per role, offered only when nothing implies a role yet.
/// Conflicting roles are left for the author to sort out.
pub fn apply_role_suggestions(method: &MethodSymbol) -> Vec<Suggestion> {
    if !role_candidates(method).is_empty() {
        return Vec::new();
    }
    PatchRole::KNOWN
        .into_iter()
        .filter_map(|role| {
            let class = role.attribute_class()?;
            let title = format!("Apply Harmony{role}");
            Some(Suggestion {
                equivalence_key: title.clone(),
                title,
                fix: Fix::ApplyRole {
                    role,
                    edit: AttributeEdit::add_to_method(method, AttributeData::new(class, vec![])),
                },
            })
        })
        .collect()
}
