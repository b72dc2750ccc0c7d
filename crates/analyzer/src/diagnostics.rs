//! The rule table and the findings reported against declarations.

use serde::{Serialize, Serializer};
use strum::{EnumIter, IntoEnumIterator};
use symbols::{Location, SymbolId};

use crate::fixes::Suggestion;

pub const DIAGNOSTIC_PREFIX: &str = "HARMONIZE";
pub const CATEGORY: &str = "Harmonize.Targeting";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Rule {
    AmbiguousTarget,
    AmbiguousData,
    MissingClassPatch,
    UnspecifiedPatchType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    /// `{0}` is replaced by the first message argument.
    pub message_format: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
}

const AMBIGUOUS_TARGET: RuleDescriptor = RuleDescriptor {
    id: "HARMONIZE001",
    title: "Ambiguous target found for patch",
    message_format: "A single unambiguous target could not be resolved for '{0}'",
    category: CATEGORY,
    default_severity: Severity::Error,
};

const AMBIGUOUS_DATA: RuleDescriptor = RuleDescriptor {
    id: "HARMONIZE002",
    title: "Ambiguous data found for patch",
    message_format: "Merging the same data fields from multiple attributes has undefined behavior",
    category: CATEGORY,
    default_severity: Severity::Warning,
};

const MISSING_CLASS_PATCH: RuleDescriptor = RuleDescriptor {
    id: "HARMONIZE003",
    title: "Missing class patch",
    message_format: "Methods annotated with HarmonyPatch should belong to a class annotated with HarmonyPatch",
    category: CATEGORY,
    default_severity: Severity::Warning,
};

const UNSPECIFIED_PATCH_TYPE: RuleDescriptor = RuleDescriptor {
    id: "HARMONIZE004",
    title: "Undefined patch type",
    message_format: "Patch type is undefined or ambiguous and cannot be determined",
    category: CATEGORY,
    default_severity: Severity::Warning,
};

impl Rule {
    pub fn descriptor(self) -> &'static RuleDescriptor {
        match self {
            Rule::AmbiguousTarget => &AMBIGUOUS_TARGET,
            Rule::AmbiguousData => &AMBIGUOUS_DATA,
            Rule::MissingClassPatch => &MISSING_CLASS_PATCH,
            Rule::UnspecifiedPatchType => &UNSPECIFIED_PATCH_TYPE,
        }
    }

    pub fn id(self) -> &'static str {
        self.descriptor().id
    }

    pub fn from_id(id: &str) -> Option<Rule> {
        Rule::iter().find(|rule| rule.id() == id)
    }

    pub fn format_message(self, arguments: &[String]) -> String {
        arguments
            .iter()
            .enumerate()
            .fold(
                self.descriptor().message_format.to_string(),
                |message, (index, argument)| message.replace(&format!("{{{index}}}"), argument),
            )
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// A rule firing on one declaration, before severity is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub rule: Rule,
    pub arguments: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Finding {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            arguments: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

/// A reported finding, ready to print.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub rule: Rule,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    pub declaration: String,
    pub symbol: Option<SymbolId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn id(&self) -> &'static str {
        self.rule.id()
    }
}
