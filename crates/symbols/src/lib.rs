//! # Symbols
//!
//! The read-only symbol model the Harmonize analyzer consumes. A language
//! front-end resolves source into types, members, parameters and attribute
//! applications and hands them over as a [`SemanticModel`], usually as a JSON
//! dump. Nothing in this crate knows about patches.

pub mod attributes;
pub mod errors;
pub mod members;
pub mod model;
pub mod types;

pub use attributes::{AttributeArgument, AttributeData};
pub use errors::{Result, SymbolModelError};
pub use members::{
    FieldSymbol, Member, MethodDeclaration, MethodSymbol, ParameterSymbol, PropertySymbol,
    TypeSymbol,
};
pub use model::SemanticModel;
pub use types::{Location, RefKind, SymbolId, TypeRef};
