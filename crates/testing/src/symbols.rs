//! Fluent builders for [`SemanticModel`]s.
//!
//! ```rust,ignore
//! let model = ModelBuilder::new()
//!     .with_type(TypeBuilder::new("Game.Player").method("Jump", |m| m))
//!     .with_type(
//!         TypeBuilder::new("Mod.JumpPatch")
//!             .attribute(patch().target_type("Game.Player").name("Jump").build())
//!             .method("Prefix", |m| m.static_method()),
//!     )
//!     .declare_all()
//!     .build();
//! ```
//!
//! Method ids follow the documentation-comment style: `M:Type.Name` for
//! parameterless methods, `M:Type.Name(T1,T2@)` otherwise, with `@` marking
//! by-reference parameters.

use symbols::{
    AttributeArgument, AttributeData, FieldSymbol, Location, Member, MethodDeclaration,
    MethodSymbol, ParameterSymbol, PropertySymbol, RefKind, SemanticModel, SymbolId, TypeRef,
    TypeSymbol,
};

const HARMONY_PATCH: &str = "HarmonyLib.HarmonyPatch";
const METHOD_TYPE: &str = "HarmonyLib.MethodType";
const ARGUMENT_TYPE: &str = "HarmonyLib.ArgumentType";

#[derive(Default)]
pub struct ModelBuilder {
    types: Vec<TypeSymbol>,
    declare_all: bool,
    unbound: Vec<String>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, ty: TypeBuilder) -> Self {
        self.types.push(ty.build());
        self
    }

    /// Adds a source declaration for every method (accessors excluded).
    pub fn declare_all(mut self) -> Self {
        self.declare_all = true;
        self
    }

    /// Adds a declaration the front-end could not bind to a symbol.
    pub fn declare_unbound(mut self, identifier: &str) -> Self {
        self.unbound.push(identifier.to_string());
        self
    }

    pub fn build(self) -> SemanticModel {
        let mut declarations = Vec::new();
        if self.declare_all {
            for ty in &self.types {
                let path = format!("{}.cs", ty.name.as_str().replace('.', "/"));
                let methods = ty.members.iter().filter_map(Member::as_method);
                for (line, method) in methods.enumerate() {
                    declarations.push(MethodDeclaration {
                        identifier: method.name.clone(),
                        location: location(&path, line),
                        is_static: method.is_static,
                        symbol: Some(method.id.clone()),
                    });
                }
            }
        }
        for (line, identifier) in self.unbound.into_iter().enumerate() {
            declarations.push(MethodDeclaration {
                identifier,
                location: location("Unbound.cs", line),
                is_static: true,
                symbol: None,
            });
        }
        SemanticModel::new(self.types, declarations).expect("Builder produced an invalid model")
    }
}

fn location(path: &str, index: usize) -> Location {
    let line = (index as u32 + 1) * 4;
    Location {
        path: path.to_string(),
        start_line: line,
        start_col: 5,
        end_line: line + 2,
        end_col: 6,
    }
}

pub struct TypeBuilder {
    name: TypeRef,
    attributes: Vec<AttributeData>,
    members: Vec<Member>,
}

impl TypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: TypeRef::new(name),
            attributes: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn method(mut self, name: &str, build: impl FnOnce(MethodBuilder) -> MethodBuilder) -> Self {
        let method = build(MethodBuilder::new(self.name.as_str(), name)).build();
        self.members.push(Member::Method(method));
        self
    }

    pub fn property(mut self, name: &str, ty: &str, getter: bool, setter: bool) -> Self {
        let owner = self.name.as_str();
        let getter = getter.then(|| MethodBuilder::new(owner, &format!("get_{name}")).build());
        let setter = setter.then(|| {
            MethodBuilder::new(owner, &format!("set_{name}"))
                .param("value", ty, RefKind::None)
                .build()
        });
        self.members.push(Member::Property(PropertySymbol {
            name: name.to_string(),
            ty: TypeRef::new(ty),
            getter,
            setter,
        }));
        self
    }

    pub fn field(mut self, name: &str, ty: &str) -> Self {
        self.members.push(Member::Field(FieldSymbol {
            name: name.to_string(),
            ty: TypeRef::new(ty),
        }));
        self
    }

    /// A parameterless instance constructor, which cannot be referenced by name.
    pub fn constructor(mut self) -> Self {
        let mut ctor = MethodBuilder::new(self.name.as_str(), ".ctor").build();
        ctor.id = SymbolId::new(format!("M:{}.#ctor", self.name));
        ctor.referenceable = false;
        self.members.push(Member::Method(ctor));
        self
    }

    pub fn build(self) -> TypeSymbol {
        TypeSymbol {
            name: self.name,
            attributes: self.attributes,
            members: self.members,
        }
    }
}

pub struct MethodBuilder {
    containing_type: TypeRef,
    name: String,
    is_static: bool,
    parameters: Vec<ParameterSymbol>,
    attributes: Vec<AttributeData>,
    invocations: Vec<SymbolId>,
}

impl MethodBuilder {
    pub fn new(containing_type: &str, name: &str) -> Self {
        Self {
            containing_type: TypeRef::new(containing_type),
            name: name.to_string(),
            is_static: false,
            parameters: Vec::new(),
            attributes: Vec::new(),
            invocations: Vec::new(),
        }
    }

    pub fn param(mut self, name: &str, ty: &str, ref_kind: RefKind) -> Self {
        self.parameters.push(ParameterSymbol::new(name, ty, ref_kind));
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// An attribute without arguments, e.g. `HarmonyLib.HarmonyPrefix`.
    pub fn marker(self, class: &str) -> Self {
        self.attribute(AttributeData::new(class, vec![]))
    }

    pub fn invokes(mut self, id: &str) -> Self {
        self.invocations.push(SymbolId::new(id));
        self
    }

    pub fn build(self) -> MethodSymbol {
        MethodSymbol {
            id: method_id(&self.containing_type, &self.name, &self.parameters),
            name: self.name,
            containing_type: self.containing_type,
            is_static: self.is_static,
            referenceable: true,
            parameters: self.parameters,
            attributes: self.attributes,
            invocations: self.invocations,
        }
    }
}

fn method_id(containing_type: &TypeRef, name: &str, parameters: &[ParameterSymbol]) -> SymbolId {
    if parameters.is_empty() {
        return SymbolId::new(format!("M:{containing_type}.{name}"));
    }
    let params: Vec<String> = parameters
        .iter()
        .map(|p| match p.ref_kind {
            RefKind::None => p.ty.to_string(),
            RefKind::Ref | RefKind::Out | RefKind::In => format!("{}@", p.ty),
        })
        .collect();
    SymbolId::new(format!("M:{containing_type}.{name}({})", params.join(",")))
}

pub fn patch() -> PatchAttributeBuilder {
    PatchAttributeBuilder::default()
}

/// Builds a `HarmonyPatch` application. Arguments are emitted in constructor
/// order (type, name, kind, types, pass kinds) whatever order they are set in.
#[derive(Default)]
pub struct PatchAttributeBuilder {
    target_type: Option<String>,
    name: Option<String>,
    kind: Option<i64>,
    types: Option<Vec<String>>,
    pass_kinds: Option<Vec<i64>>,
}

impl PatchAttributeBuilder {
    pub fn target_type(mut self, ty: &str) -> Self {
        self.target_type = Some(ty.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// A `HarmonyLib.MethodType` constant.
    pub fn kind(mut self, kind: i64) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn types(mut self, types: &[&str]) -> Self {
        self.types = Some(types.iter().map(|t| t.to_string()).collect());
        self
    }

    /// `HarmonyLib.ArgumentType` constants.
    pub fn pass_kinds(mut self, kinds: &[i64]) -> Self {
        self.pass_kinds = Some(kinds.to_vec());
        self
    }

    pub fn build(self) -> AttributeData {
        let mut arguments = Vec::new();
        if let Some(ty) = self.target_type {
            arguments.push(AttributeArgument::type_of(ty));
        }
        if let Some(name) = self.name {
            arguments.push(AttributeArgument::string(name));
        }
        if let Some(kind) = self.kind {
            arguments.push(AttributeArgument::enum_constant(METHOD_TYPE, kind));
        }
        if let Some(types) = self.types {
            arguments.push(AttributeArgument::array(
                "System.Type",
                types.into_iter().map(AttributeArgument::type_of).collect(),
            ));
        }
        if let Some(kinds) = self.pass_kinds {
            arguments.push(AttributeArgument::array(
                ARGUMENT_TYPE,
                kinds
                    .into_iter()
                    .map(|kind| AttributeArgument::enum_constant(ARGUMENT_TYPE, kind))
                    .collect(),
            ));
        }
        AttributeData::new(HARMONY_PATCH, arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_documentation_comment_style() {
        let method = MethodBuilder::new("Game.Player", "Jump")
            .param("height", "System.Int32", RefKind::Ref)
            .param("label", "System.String", RefKind::None)
            .build();
        assert_eq!(method.id.as_str(), "M:Game.Player.Jump(System.Int32@,System.String)");
        assert_eq!(
            MethodBuilder::new("Game.Player", "Jump").build().id.as_str(),
            "M:Game.Player.Jump"
        );
    }

    #[test]
    fn declare_all_skips_accessors_and_keeps_order() {
        let model = ModelBuilder::new()
            .with_type(
                TypeBuilder::new("Game.Player")
                    .method("Jump", |m| m.static_method())
                    .property("Health", "System.Int32", true, true)
                    .method("Run", |m| m),
            )
            .declare_all()
            .declare_unbound("Broken")
            .build();

        let identifiers: Vec<&str> = model
            .declarations()
            .iter()
            .map(|d| d.identifier.as_str())
            .collect();
        assert_eq!(identifiers, vec!["Jump", "Run", "Broken"]);
        assert!(model.declarations()[0].is_static);
        assert_eq!(model.declarations()[2].symbol, None);
        assert!(
            model
                .get_method(&SymbolId::new("M:Game.Player.set_Health(System.Int32)"))
                .is_some()
        );
    }

    #[test]
    fn patch_arguments_come_out_in_constructor_order() {
        let attribute = patch().types(&["System.Int32"]).name("Jump").build();
        assert_eq!(
            attribute.arguments,
            vec![
                AttributeArgument::string("Jump"),
                AttributeArgument::array(
                    "System.Type",
                    vec![AttributeArgument::type_of("System.Int32")]
                ),
            ]
        );
    }
}
