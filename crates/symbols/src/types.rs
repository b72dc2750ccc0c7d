use internment::ArcIntern;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully qualified name of a type as the front-end spells it, e.g. `System.String`
/// or `System.String[]`. Two references are the same type exactly when the names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeRef(ArcIntern<String>);

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(ArcIntern::new(name.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Name as a C# author would write it: keyword aliases for the special
    /// types, containing namespaces stripped.
    pub fn display_name(&self) -> String {
        let (element, rank) = split_array_suffix(self.as_str());
        let base = match special_type_keyword(element) {
            Some(keyword) => keyword.to_string(),
            None => element.rsplit('.').next().unwrap_or(element).to_string(),
        };
        format!("{base}{}", "[]".repeat(rank))
    }
}

impl From<String> for TypeRef {
    fn from(value: String) -> Self {
        Self(ArcIntern::new(value))
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn split_array_suffix(name: &str) -> (&str, usize) {
    let mut element = name;
    let mut rank = 0;
    while let Some(stripped) = element.strip_suffix("[]") {
        element = stripped;
        rank += 1;
    }
    (element, rank)
}

const SPECIAL_TYPES: &[(&str, &str)] = &[
    ("System.Boolean", "bool"),
    ("System.Byte", "byte"),
    ("System.SByte", "sbyte"),
    ("System.Char", "char"),
    ("System.Decimal", "decimal"),
    ("System.Double", "double"),
    ("System.Single", "float"),
    ("System.Int16", "short"),
    ("System.UInt16", "ushort"),
    ("System.Int32", "int"),
    ("System.UInt32", "uint"),
    ("System.Int64", "long"),
    ("System.UInt64", "ulong"),
    ("System.Object", "object"),
    ("System.String", "string"),
    ("System.Void", "void"),
];

fn special_type_keyword(name: &str) -> Option<&'static str> {
    SPECIAL_TYPES
        .iter()
        .find(|(full, _)| *full == name)
        .map(|(_, keyword)| *keyword)
}

/// Opaque identity of a method symbol. Unique within a [`crate::SemanticModel`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SymbolId(ArcIntern<String>);

impl SymbolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(ArcIntern::new(id.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for SymbolId {
    fn from(value: String) -> Self {
        Self(ArcIntern::new(value))
    }
}

impl From<&str> for SymbolId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<SymbolId> for String {
    fn from(value: SymbolId) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

impl RefKind {
    pub fn modifier(&self) -> Option<&'static str> {
        match self {
            RefKind::None => None,
            RefKind::Ref => Some("ref"),
            RefKind::Out => Some("out"),
            RefKind::In => Some("in"),
        }
    }
}

/// Source span of a declaration. The analyzer only carries it through to findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    pub start_line: u32,
    pub start_col: u32,
    #[serde(default)]
    pub end_line: u32,
    #[serde(default)]
    pub end_col: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.start_line, self.start_col)
    }
}
