//! Matching descriptor data against the members of the target type.
//!
//! Both entry points share [`filter_candidates`], which walks the cross product
//! of member pool, member kinds and argument lists and keeps the combinations
//! that resolve to a real callable.

use rustc_hash::FxHashSet;
use serde::Serialize;
use symbols::{Member, MethodSymbol, ParameterSymbol, SemanticModel, TypeRef};
use tracing::trace;

use crate::ambiguous::Ambiguous;
use crate::descriptor::{ArgumentDescriptor, ArgumentList, MemberKind, PassKind};
use crate::simplifier::simplify_change_batch;

/// The attribute data needed to select one particular member. After
/// simplification a field is `None` when stating it is not necessary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct MetadataChange {
    pub name: Option<String>,
    pub kind: Option<MemberKind>,
    pub arguments: Option<Vec<ArgumentDescriptor>>,
}

impl MetadataChange {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.kind.is_none() && self.arguments.is_none()
    }
}

/// A member that matched, with the metadata that selects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchCandidate<'m> {
    pub method: &'m MethodSymbol,
    pub change: MetadataChange,
}

/// Methods matching fully specified data. Unstated arguments match any
/// signature. A well-formed patch has exactly one.
pub fn get_fully_specified_candidates<'m>(
    model: &'m SemanticModel,
    declaring_type: &TypeRef,
    member_name: &str,
    member_kind: MemberKind,
    arguments: Option<&ArgumentList>,
) -> Vec<&'m MethodSymbol> {
    // Misaligned type/pass-kind arrays can never match anything.
    let arguments = match arguments {
        Some(list) => match list.descriptors() {
            Some(descriptors) => Some(descriptors),
            None => return Vec::new(),
        },
        None => None,
    };

    let names = [member_name.to_string()];
    filter_candidates(
        model,
        declaring_type,
        Some(&names[..]),
        Some(&[member_kind][..]),
        &[arguments],
    )
    .into_iter()
    .map(|candidate| candidate.method)
    .collect()
}

/// Every member reachable from any combination of the (possibly ambiguous or
/// absent) fields, each paired with the minimal metadata selecting it.
pub fn get_candidates<'m>(
    model: &'m SemanticModel,
    declaring_type: &TypeRef,
    member_name: Option<&Ambiguous<String>>,
    member_kind: Option<&Ambiguous<MemberKind>>,
    arguments: Option<&Ambiguous<ArgumentList>>,
) -> Vec<PatchCandidate<'m>> {
    let argument_candidates: Vec<Option<Vec<ArgumentDescriptor>>> = match arguments {
        Some(lists) => lists
            .iter()
            .filter_map(ArgumentList::descriptors)
            .map(Some)
            .collect(),
        None => vec![None],
    };

    let matched = filter_candidates(
        model,
        declaring_type,
        member_name.map(Ambiguous::candidates),
        member_kind.map(Ambiguous::candidates),
        &argument_candidates,
    );

    let mut seen = FxHashSet::default();
    let batch: Vec<PatchCandidate<'m>> = matched
        .into_iter()
        .filter(|candidate| seen.insert((candidate.method.id.clone(), candidate.change.clone())))
        .collect();

    trace!(
        declaring_type = %declaring_type,
        candidates = batch.len(),
        "Collected patch candidates"
    );
    simplify_change_batch(batch, member_name, member_kind, arguments)
}

fn filter_candidates<'m>(
    model: &'m SemanticModel,
    declaring_type: &TypeRef,
    member_names: Option<&[String]>,
    member_kinds: Option<&[MemberKind]>,
    argument_candidates: &[Option<Vec<ArgumentDescriptor>>],
) -> Vec<PatchCandidate<'m>> {
    let Some(ty) = model.get_type(declaring_type) else {
        trace!(declaring_type = %declaring_type, "Target type is not in the model");
        return Vec::new();
    };

    let pool: Vec<&'m Member> = match member_names {
        Some(names) => names
            .iter()
            .flat_map(|name| ty.members_named(name))
            .collect(),
        None => ty.members.iter().collect(),
    };
    let kinds = member_kinds.unwrap_or(&MemberKind::ALL[..]);

    let mut matched = Vec::new();
    for member in pool
        .into_iter()
        .filter(|member| member.can_be_referenced_by_name())
    {
        for &kind in kinds {
            let Some(method) = resolve_callable(member, kind) else {
                continue;
            };
            for arguments in argument_candidates {
                if let Some(arguments) = arguments
                    && !all_arguments_match(&method.parameters, arguments)
                {
                    continue;
                }
                matched.push(PatchCandidate {
                    method,
                    change: MetadataChange {
                        name: Some(member.name().to_string()),
                        kind: Some(kind),
                        arguments: synthesize_arguments(member),
                    },
                });
            }
        }
    }
    matched
}

fn resolve_callable(member: &Member, kind: MemberKind) -> Option<&MethodSymbol> {
    match kind {
        MemberKind::Normal => member.as_method(),
        MemberKind::Getter => member.as_property().and_then(|p| p.getter.as_ref()),
        MemberKind::Setter => member.as_property().and_then(|p| p.setter.as_ref()),
        MemberKind::Unsupported => None,
    }
}

fn all_arguments_match(parameters: &[ParameterSymbol], arguments: &[ArgumentDescriptor]) -> bool {
    if parameters.len() != arguments.len() {
        return false;
    }
    parameters.iter().zip(arguments).all(|(parameter, argument)| {
        argument
            .pass_kind
            .is_none_or(|kind| kind.accepts(parameter.ref_kind))
            && parameter.ty == argument.ty
    })
}

/// The argument list a member actually requires. Property accessors are
/// selected by name and kind alone, so they get none.
fn synthesize_arguments(member: &Member) -> Option<Vec<ArgumentDescriptor>> {
    let method = member.as_method()?;
    Some(
        method
            .parameters
            .iter()
            .map(|p| {
                ArgumentDescriptor::new(p.ty.clone(), Some(PassKind::from_ref_kind(p.ref_kind)))
            })
            .collect(),
    )
}
