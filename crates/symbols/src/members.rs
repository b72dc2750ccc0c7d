use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::attributes::AttributeData;
use crate::types::{Location, RefKind, SymbolId, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub ref_kind: RefKind,
}

impl ParameterSymbol {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>, ref_kind: RefKind) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ref_kind,
        }
    }
}

fn default_referenceable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub id: SymbolId,
    pub name: String,
    pub containing_type: TypeRef,
    #[serde(default)]
    pub is_static: bool,
    /// False for symbols the language cannot name directly (constructors,
    /// compiler-generated members).
    #[serde(default = "default_referenceable")]
    pub referenceable: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    /// Methods invoked from this method's body.
    #[serde(default)]
    pub invocations: Vec<SymbolId>,
}

impl MethodSymbol {
    pub fn has_attribute(&self, class: &str) -> bool {
        self.attributes.iter().any(|attr| attr.is(class))
    }

    /// `Player.Jump(ref int height)`
    pub fn display_short(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| match p.ref_kind.modifier() {
                Some(modifier) => format!("{modifier} {} {}", p.ty.display_name(), p.name),
                None => format!("{} {}", p.ty.display_name(), p.name),
            })
            .collect();
        format!(
            "{}.{}({})",
            self.containing_type.display_name(),
            self.name,
            params.join(", ")
        )
    }

    /// `Game.Player.Jump(ref int)`
    pub fn display_qualified(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| match p.ref_kind.modifier() {
                Some(modifier) => format!("{modifier} {}", p.ty.display_name()),
                None => p.ty.display_name(),
            })
            .collect();
        format!(
            "{}.{}({})",
            self.containing_type.as_str(),
            self.name,
            params.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub getter: Option<MethodSymbol>,
    #[serde(default)]
    pub setter: Option<MethodSymbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Method(MethodSymbol),
    Property(PropertySymbol),
    Field(FieldSymbol),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Method(method) => &method.name,
            Member::Property(property) => &property.name,
            Member::Field(field) => &field.name,
        }
    }

    pub fn can_be_referenced_by_name(&self) -> bool {
        match self {
            Member::Method(method) => method.referenceable,
            Member::Property(_) | Member::Field(_) => true,
        }
    }

    pub fn as_method(&self) -> Option<&MethodSymbol> {
        match self {
            Member::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertySymbol> {
        match self {
            Member::Property(property) => Some(property),
            _ => None,
        }
    }

    /// Every method symbol owned by this member, accessors included.
    pub fn methods(&self) -> SmallVec<[&MethodSymbol; 2]> {
        let mut methods = SmallVec::new();
        match self {
            Member::Method(method) => methods.push(method),
            Member::Property(property) => {
                methods.extend(property.getter.as_ref());
                methods.extend(property.setter.as_ref());
            }
            Member::Field(_) => {}
        }
        methods
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSymbol {
    pub name: TypeRef,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl TypeSymbol {
    pub fn members_named<'s, 'n>(
        &'s self,
        name: &'n str,
    ) -> impl Iterator<Item = &'s Member> + use<'s, 'n> {
        self.members.iter().filter(move |m| m.name() == name)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodSymbol> {
        self.members.iter().flat_map(|m| m.methods())
    }
}

/// A method declaration as it appears in source. `symbol` is `None` when the
/// front-end could not bind the declaration to a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub identifier: String,
    pub location: Location,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub symbol: Option<SymbolId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, parameters: Vec<ParameterSymbol>) -> MethodSymbol {
        MethodSymbol {
            id: SymbolId::new(format!("M:Game.Player.{name}")),
            name: name.to_string(),
            containing_type: TypeRef::new("Game.Player"),
            is_static: false,
            referenceable: true,
            parameters,
            attributes: vec![],
            invocations: vec![],
        }
    }

    #[test]
    fn display_includes_ref_modifiers() {
        let m = method(
            "Jump",
            vec![
                ParameterSymbol::new("height", "System.Int32", RefKind::Ref),
                ParameterSymbol::new("label", "System.String", RefKind::None),
            ],
        );
        assert_eq!(m.display_short(), "Player.Jump(ref int height, string label)");
        assert_eq!(m.display_qualified(), "Game.Player.Jump(ref int, string)");
    }

    #[test]
    fn property_member_exposes_both_accessors() {
        let property = Member::Property(PropertySymbol {
            name: "Health".to_string(),
            ty: TypeRef::new("System.Int32"),
            getter: Some(method("get_Health", vec![])),
            setter: Some(method(
                "set_Health",
                vec![ParameterSymbol::new("value", "System.Int32", RefKind::None)],
            )),
        });
        let names: Vec<&str> = property.methods().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["get_Health", "set_Health"]);
        assert!(property.can_be_referenced_by_name());
    }

    #[test]
    fn member_deserializes_with_defaults() {
        let json = r#"{
            "member": "method",
            "id": "M:Game.Player.Reset",
            "name": "Reset",
            "containing_type": "Game.Player"
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        let method = member.as_method().unwrap();
        assert!(method.referenceable);
        assert!(!method.is_static);
        assert!(method.parameters.is_empty());
    }
}
