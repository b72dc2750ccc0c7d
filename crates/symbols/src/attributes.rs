use serde::{Deserialize, Serialize};

use crate::types::TypeRef;

/// One attribute application with its positional constructor arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeData {
    /// Fully qualified attribute class, e.g. `HarmonyLib.HarmonyPatch`.
    pub class: String,
    #[serde(default)]
    pub arguments: Vec<AttributeArgument>,
}

impl AttributeData {
    pub fn new(class: impl Into<String>, arguments: Vec<AttributeArgument>) -> Self {
        Self {
            class: class.into(),
            arguments,
        }
    }

    pub fn is(&self, class: &str) -> bool {
        self.class == class
    }
}

/// A typed constant passed to an attribute constructor, discriminated by the
/// shape the front-end detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeArgument {
    /// `typeof(T)`
    Type { value: TypeRef },
    /// A non-null string literal.
    String { value: String },
    /// An enum constant, carried as its underlying integer value.
    Enum { enum_type: String, value: i64 },
    /// An array constant; `element_type` is the array's declared element type.
    Array {
        element_type: String,
        values: Vec<AttributeArgument>,
    },
    /// A `null` constant of the given type.
    Null { ty: String },
    /// Any other primitive constant.
    Other { ty: String },
}

impl AttributeArgument {
    pub fn type_of(value: impl Into<TypeRef>) -> Self {
        AttributeArgument::Type {
            value: value.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        AttributeArgument::String {
            value: value.into(),
        }
    }

    pub fn enum_constant(enum_type: impl Into<String>, value: i64) -> Self {
        AttributeArgument::Enum {
            enum_type: enum_type.into(),
            value,
        }
    }

    pub fn array(element_type: impl Into<String>, values: Vec<AttributeArgument>) -> Self {
        AttributeArgument::Array {
            element_type: element_type.into(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_deserialize_from_tagged_json() {
        let json = r#"[
            {"kind": "type", "value": "Game.Player"},
            {"kind": "string", "value": "Jump"},
            {"kind": "enum", "enum_type": "HarmonyLib.MethodType", "value": 1},
            {"kind": "array", "element_type": "System.Type", "values": [
                {"kind": "type", "value": "System.Int32"}
            ]},
            {"kind": "null", "ty": "System.String"}
        ]"#;
        let args: Vec<AttributeArgument> = serde_json::from_str(json).unwrap();

        assert_eq!(args[0], AttributeArgument::type_of("Game.Player"));
        assert_eq!(args[1], AttributeArgument::string("Jump"));
        assert_eq!(
            args[2],
            AttributeArgument::enum_constant("HarmonyLib.MethodType", 1)
        );
        assert_eq!(
            args[3],
            AttributeArgument::array(
                "System.Type",
                vec![AttributeArgument::type_of("System.Int32")]
            )
        );
        assert_eq!(
            args[4],
            AttributeArgument::Null {
                ty: "System.String".to_string()
            }
        );
    }
}
