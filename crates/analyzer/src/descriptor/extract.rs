use symbols::{AttributeArgument, AttributeData, MethodSymbol, SemanticModel, TypeRef};
use tracing::trace;

use super::{
    ARGUMENT_TYPE_ENUM, ArgumentList, HARMONY_PATCH, METHOD_TYPE_ENUM, MemberKind, PassKind,
    PatchDescriptor, SYSTEM_TYPE,
};
use crate::ambiguous::Ambiguous;

/// The shape of one positional constructor argument, as far as the
/// `HarmonyPatch` overloads care.
#[derive(Debug)]
enum Shape<'a> {
    Kind(MemberKind),
    Name(&'a str),
    Type(&'a TypeRef),
    Types(Vec<TypeRef>),
    PassKinds(Vec<PassKind>),
    Other,
}

fn classify(argument: &AttributeArgument) -> Shape<'_> {
    match argument {
        AttributeArgument::Enum { enum_type, value } if enum_type == METHOD_TYPE_ENUM => {
            Shape::Kind(MemberKind::from_constant(*value))
        }
        AttributeArgument::String { value } => Shape::Name(value),
        AttributeArgument::Type { value } => Shape::Type(value),
        AttributeArgument::Array {
            element_type,
            values,
        } if element_type == SYSTEM_TYPE => {
            let types: Option<Vec<TypeRef>> = values
                .iter()
                .map(|v| match v {
                    AttributeArgument::Type { value } => Some(value.clone()),
                    _ => None,
                })
                .collect();
            types.map_or(Shape::Other, Shape::Types)
        }
        AttributeArgument::Array {
            element_type,
            values,
        } if element_type == ARGUMENT_TYPE_ENUM => Shape::PassKinds(
            values
                .iter()
                .map(|v| match v {
                    AttributeArgument::Enum { value, .. } => PassKind::from_constant(*value),
                    _ => PassKind::Unsupported,
                })
                .collect(),
        ),
        _ => Shape::Other,
    }
}

fn single<T>(value: T) -> Option<Ambiguous<T>> {
    Some(Ambiguous::single(value))
}

fn descriptor(
    target_type: Option<&TypeRef>,
    member_name: Option<&str>,
    member_kind: Option<MemberKind>,
    arguments: Option<ArgumentList>,
) -> PatchDescriptor {
    PatchDescriptor {
        target_type: target_type.cloned().and_then(single),
        member_name: member_name.map(str::to_string).and_then(single),
        member_kind: member_kind.and_then(single),
        arguments: arguments.and_then(single),
    }
}

fn types_only(types: &[TypeRef]) -> Option<ArgumentList> {
    Some(ArgumentList::new(types.to_vec(), None))
}

fn types_with_kinds(types: &[TypeRef], kinds: &[PassKind]) -> Option<ArgumentList> {
    Some(ArgumentList::new(types.to_vec(), Some(kinds.to_vec())))
}

/// Reads the fields one `HarmonyPatch` application conveys. Constructor
/// overloads that are not recognized yield an empty descriptor.
pub fn extract_from_attribute(attribute: &AttributeData) -> PatchDescriptor {
    use Shape::*;

    let shapes: Vec<Shape<'_>> = attribute.arguments.iter().map(classify).collect();
    match shapes.as_slice() {
        [] => PatchDescriptor::default(),

        [Kind(kind)] => descriptor(None, None, Some(*kind), None),
        [Name(name)] => descriptor(None, Some(*name), None, None),
        [Type(ty)] => descriptor(Some(*ty), None, None, None),
        [Types(types)] => descriptor(None, None, None, types_only(types)),

        [Kind(kind), Types(types)] => descriptor(None, None, Some(*kind), types_only(types)),
        [Name(name), Kind(kind)] => descriptor(None, Some(*name), Some(*kind), None),
        [Name(name), Types(types)] => descriptor(None, Some(*name), None, types_only(types)),
        [Type(ty), Kind(kind)] => descriptor(Some(*ty), None, Some(*kind), None),
        [Type(ty), Name(name)] => descriptor(Some(*ty), Some(*name), None, None),
        [Type(ty), Types(types)] => descriptor(Some(*ty), None, None, types_only(types)),
        [Types(types), PassKinds(kinds)] => {
            descriptor(None, None, None, types_with_kinds(types, kinds))
        }

        [Kind(kind), Types(types), PassKinds(kinds)] => {
            descriptor(None, None, Some(*kind), types_with_kinds(types, kinds))
        }
        // (typeName, methodName, MethodType) would need a whole-compilation
        // lookup of the type by name.
        [Name(_), Name(_), _] => PatchDescriptor::default(),
        [Name(name), Types(types), PassKinds(kinds)] => {
            descriptor(None, Some(*name), None, types_with_kinds(types, kinds))
        }
        [Type(ty), Kind(kind), Types(types)] => {
            descriptor(Some(*ty), None, Some(*kind), types_only(types))
        }
        [Type(ty), Name(name), Kind(kind)] => descriptor(Some(*ty), Some(*name), Some(*kind), None),
        [Type(ty), Name(name), Types(types)] => {
            descriptor(Some(*ty), Some(*name), None, types_only(types))
        }

        [Type(ty), Kind(kind), Types(types), PassKinds(kinds)] => {
            descriptor(Some(*ty), None, Some(*kind), types_with_kinds(types, kinds))
        }
        [Type(ty), Name(name), Types(types), PassKinds(kinds)] => {
            descriptor(Some(*ty), Some(*name), None, types_with_kinds(types, kinds))
        }

        _ => {
            trace!(?shapes, "Unrecognized HarmonyPatch constructor overload");
            PatchDescriptor::default()
        }
    }
}

/// The `HarmonyPatch` applications among `attributes`, in declaration order.
pub fn patch_attributes(attributes: &[AttributeData]) -> impl Iterator<Item = &AttributeData> {
    attributes.iter().filter(|attr| attr.is(HARMONY_PATCH))
}

/// Symmetric merge of every `HarmonyPatch` application on one symbol, or
/// `None` when the symbol carries none.
pub fn extract_from_attributes(attributes: &[AttributeData]) -> Option<PatchDescriptor> {
    patch_attributes(attributes)
        .map(extract_from_attribute)
        .reduce(PatchDescriptor::merge_symmetric)
}

/// Method-level data merged over the class-level data of the containing type.
/// `None` when neither level is annotated.
pub fn extract_from_symbol_with_inheritance(
    model: &SemanticModel,
    method: &MethodSymbol,
) -> Option<PatchDescriptor> {
    let method_data = extract_from_attributes(&method.attributes);
    let class_data = model
        .containing_type_of(method)
        .and_then(|ty| extract_from_attributes(&ty.attributes));

    match (method_data, class_data) {
        (None, None) => None,
        (Some(method_data), None) => Some(method_data),
        (None, Some(class_data)) => Some(class_data),
        (Some(method_data), Some(class_data)) => Some(method_data.merge_over(class_data)),
    }
}
