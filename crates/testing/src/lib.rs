//! Helpers shared by the tests of every crate in the workspace.

pub mod fixtures;
pub mod symbols;
