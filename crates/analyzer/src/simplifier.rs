//! Trimming candidate changes down to what tells them apart.

use rustc_hash::{FxHashMap, FxHashSet};
use symbols::TypeRef;

use crate::ambiguous::Ambiguous;
use crate::descriptor::{ArgumentDescriptor, ArgumentList, MemberKind, PassKind};
use crate::matcher::PatchCandidate;

/// Removes from each change the data that is not needed to tell it apart from
/// the rest of the batch, and the data the user already wrote unambiguously.
///
/// Candidates are grouped by member name; groups come out in order of first
/// appearance and keep their input order inside.
pub fn simplify_change_batch<'m>(
    batch: Vec<PatchCandidate<'m>>,
    user_name: Option<&Ambiguous<String>>,
    user_kind: Option<&Ambiguous<MemberKind>>,
    user_arguments: Option<&Ambiguous<ArgumentList>>,
) -> Vec<PatchCandidate<'m>> {
    let user_name = user_name.and_then(Ambiguous::unique);
    let user_kind = user_kind.and_then(Ambiguous::unique);
    let user_arguments = user_arguments
        .and_then(Ambiguous::unique)
        .map(ArgumentList::descriptors);

    let mut result = Vec::with_capacity(batch.len());
    for group in group_by_name(batch) {
        let distinct_arguments: FxHashSet<&Option<Vec<ArgumentDescriptor>>> =
            group.iter().map(|c| &c.change.arguments).collect();
        let arguments_are_uniform = distinct_arguments.len() == 1;

        // Argument types -> distinct pass-kind lists seen with those types.
        let mut pass_kinds_by_types: FxHashMap<Vec<TypeRef>, FxHashSet<Vec<Option<PassKind>>>> =
            FxHashMap::default();
        for candidate in &group {
            if let Some(arguments) = &candidate.change.arguments {
                let (types, kinds) = split(arguments);
                pass_kinds_by_types.entry(types).or_default().insert(kinds);
            }
        }

        for mut candidate in group {
            let change = &mut candidate.change;

            if change.kind == Some(MemberKind::Normal) {
                change.kind = None;
            }

            if arguments_are_uniform {
                change.arguments = None;
            } else if let Some(arguments) = &mut change.arguments {
                let (types, _) = split(arguments);
                if pass_kinds_by_types
                    .get(&types)
                    .is_some_and(|kinds| kinds.len() == 1)
                {
                    for argument in arguments.iter_mut() {
                        argument.pass_kind = None;
                    }
                }
            }

            if user_name.is_some() && user_name == change.name.as_ref() {
                change.name = None;
            }
            if user_kind.is_some() && user_kind.copied() == change.kind {
                change.kind = None;
            }
            if let Some(user_arguments) = &user_arguments
                && *user_arguments == change.arguments
            {
                change.arguments = None;
            }

            result.push(candidate);
        }
    }
    result
}

fn group_by_name(batch: Vec<PatchCandidate<'_>>) -> Vec<Vec<PatchCandidate<'_>>> {
    let mut index: FxHashMap<Option<String>, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<PatchCandidate<'_>>> = Vec::new();
    for candidate in batch {
        let slot = *index
            .entry(candidate.change.name.clone())
            .or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[slot].push(candidate);
    }
    groups
}

fn split(arguments: &[ArgumentDescriptor]) -> (Vec<TypeRef>, Vec<Option<PassKind>>) {
    arguments
        .iter()
        .map(|argument| (argument.ty.clone(), argument.pass_kind))
        .unzip()
}
