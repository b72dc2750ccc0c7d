use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::errors::{Result, SymbolModelError};
use crate::members::{Member, MethodDeclaration, MethodSymbol, TypeSymbol};
use crate::types::{SymbolId, TypeRef};

/// On-disk shape of a model dump produced by a front-end.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ModelDump {
    #[serde(default)]
    types: Vec<TypeSymbol>,
    #[serde(default)]
    declarations: Vec<MethodDeclaration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accessor {
    None,
    Getter,
    Setter,
}

#[derive(Debug, Clone, Copy)]
struct MethodPath {
    type_index: usize,
    member_index: usize,
    accessor: Accessor,
}

/// Read-only view of the symbols of one compilation, indexed for lookup by
/// type name and method id.
#[derive(Debug, Default)]
pub struct SemanticModel {
    types: Vec<TypeSymbol>,
    declarations: Vec<MethodDeclaration>,
    /// Type name -> index into `types`
    type_index: FxHashMap<TypeRef, usize>,
    /// Method id -> position of the method (or accessor) in `types`
    method_index: FxHashMap<SymbolId, MethodPath>,
}

impl SemanticModel {
    pub fn new(types: Vec<TypeSymbol>, declarations: Vec<MethodDeclaration>) -> Result<Self> {
        let mut type_index = FxHashMap::default();
        let mut method_index = FxHashMap::default();

        for (type_index_value, ty) in types.iter().enumerate() {
            if type_index.insert(ty.name.clone(), type_index_value).is_some() {
                return Err(SymbolModelError::DuplicateType(ty.name.to_string()));
            }

            for (member_index, member) in ty.members.iter().enumerate() {
                let owned: Vec<(&MethodSymbol, Accessor)> = match member {
                    Member::Method(method) => vec![(method, Accessor::None)],
                    Member::Property(property) => property
                        .getter
                        .iter()
                        .map(|m| (m, Accessor::Getter))
                        .chain(property.setter.iter().map(|m| (m, Accessor::Setter)))
                        .collect(),
                    Member::Field(_) => continue,
                };

                for (method, accessor) in owned {
                    let path = MethodPath {
                        type_index: type_index_value,
                        member_index,
                        accessor,
                    };
                    if method_index.insert(method.id.clone(), path).is_some() {
                        return Err(SymbolModelError::DuplicateSymbol(method.id.to_string()));
                    }
                }
            }
        }

        for declaration in &declarations {
            if let Some(symbol) = &declaration.symbol
                && !method_index.contains_key(symbol)
            {
                return Err(SymbolModelError::UnknownDeclarationSymbol {
                    identifier: declaration.identifier.clone(),
                    symbol: symbol.to_string(),
                });
            }
        }

        debug!(
            types = types.len(),
            methods = method_index.len(),
            declarations = declarations.len(),
            "Indexed semantic model"
        );

        Ok(Self {
            types,
            declarations,
            type_index,
            method_index,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let dump: ModelDump = serde_json::from_str(json)?;
        Self::new(dump.types, dump.declarations)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SymbolModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String> {
        #[derive(Serialize)]
        struct DumpRef<'a> {
            types: &'a [TypeSymbol],
            declarations: &'a [MethodDeclaration],
        }

        Ok(serde_json::to_string_pretty(&DumpRef {
            types: &self.types,
            declarations: &self.declarations,
        })?)
    }

    pub fn types(&self) -> &[TypeSymbol] {
        &self.types
    }

    pub fn declarations(&self) -> &[MethodDeclaration] {
        &self.declarations
    }

    pub fn get_type(&self, name: &TypeRef) -> Option<&TypeSymbol> {
        self.type_index.get(name).map(|&index| &self.types[index])
    }

    pub fn get_method(&self, id: &SymbolId) -> Option<&MethodSymbol> {
        let path = self.method_index.get(id)?;
        let member = &self.types[path.type_index].members[path.member_index];
        match (member, path.accessor) {
            (Member::Method(method), Accessor::None) => Some(method),
            (Member::Property(property), Accessor::Getter) => property.getter.as_ref(),
            (Member::Property(property), Accessor::Setter) => property.setter.as_ref(),
            _ => None,
        }
    }

    pub fn containing_type_of(&self, method: &MethodSymbol) -> Option<&TypeSymbol> {
        self.get_type(&method.containing_type)
    }

    pub fn declaration_for(&self, id: &SymbolId) -> Option<&MethodDeclaration> {
        self.declarations
            .iter()
            .find(|decl| decl.symbol.as_ref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DUMP: &str = r#"{
        "types": [
            {
                "name": "Game.Player",
                "members": [
                    {"member": "method", "id": "M:Game.Player.Jump", "name": "Jump", "containing_type": "Game.Player"},
                    {"member": "property", "name": "Health", "type": "System.Int32",
                     "getter": {"id": "M:Game.Player.get_Health", "name": "get_Health", "containing_type": "Game.Player"}},
                    {"member": "field", "name": "speed", "type": "System.Single"}
                ]
            },
            {
                "name": "Mod.Patches",
                "members": [
                    {"member": "method", "id": "M:Mod.Patches.Prefix", "name": "Prefix",
                     "containing_type": "Mod.Patches", "is_static": true}
                ]
            }
        ],
        "declarations": [
            {"identifier": "Prefix", "location": {"path": "Patches.cs", "start_line": 4, "start_col": 24},
             "is_static": true, "symbol": "M:Mod.Patches.Prefix"},
            {"identifier": "Broken", "location": {"path": "Patches.cs", "start_line": 9, "start_col": 5}}
        ]
    }"#;

    #[test]
    fn indexes_types_methods_and_accessors() {
        let model = SemanticModel::from_json_str(DUMP).unwrap();

        let player = model.get_type(&TypeRef::new("Game.Player")).unwrap();
        assert_eq!(player.members.len(), 3);

        let getter = model
            .get_method(&SymbolId::new("M:Game.Player.get_Health"))
            .unwrap();
        assert_eq!(getter.name, "get_Health");

        let prefix = model.get_method(&SymbolId::new("M:Mod.Patches.Prefix")).unwrap();
        assert_eq!(
            model.containing_type_of(prefix).unwrap().name.as_str(),
            "Mod.Patches"
        );
        assert!(model.get_type(&TypeRef::new("Game.Missing")).is_none());
    }

    #[test]
    fn unbound_declarations_are_kept() {
        let model = SemanticModel::from_json_str(DUMP).unwrap();
        assert_eq!(model.declarations().len(), 2);
        assert!(model.declarations()[1].symbol.is_none());
    }

    #[test]
    fn rejects_duplicate_symbol_ids() {
        let json = r#"{"types": [{"name": "A", "members": [
            {"member": "method", "id": "M:A.F", "name": "F", "containing_type": "A"},
            {"member": "method", "id": "M:A.F", "name": "F", "containing_type": "A"}
        ]}]}"#;
        let err = SemanticModel::from_json_str(json).unwrap_err();
        assert!(matches!(err, SymbolModelError::DuplicateSymbol(id) if id == "M:A.F"));
    }

    #[test]
    fn rejects_declarations_of_unknown_symbols() {
        let json = r#"{"declarations": [
            {"identifier": "Prefix", "location": {"path": "a.cs", "start_line": 1, "start_col": 1},
             "symbol": "M:Nowhere.Prefix"}
        ]}"#;
        let err = SemanticModel::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            SymbolModelError::UnknownDeclarationSymbol { .. }
        ));
    }

    #[test]
    fn round_trips_through_json_file() {
        let model = SemanticModel::from_json_str(DUMP).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(model.to_json_string().unwrap().as_bytes())
            .unwrap();

        let reloaded = SemanticModel::from_path(file.path()).unwrap();
        assert_eq!(reloaded.types(), model.types());
        assert_eq!(reloaded.declarations(), model.declarations());
    }
}
