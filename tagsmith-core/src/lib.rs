//! Core utilities and types for the tagsmith code generator.
//!
//! This crate provides the vocabulary shared by every other tagsmith crate:
//! marker kinds, the host element model handed over by the compiler, resource
//! types and scopes, and file writing for rendered artifacts.

mod element;
mod file;
mod marker;
mod resource;
mod utils;

// Host element model
pub use element::{
    ArgValue, Element, ElementKind, MethodSig, Modifier, Param, RawDeclaration,
};
// File operations
pub use file::{GeneratedFile, WriteResult};
pub use marker::MarkerKind;
// Resources
pub use resource::{ResourceScope, ResourceType, SymbolEntry};
// String utilities
pub use utils::{is_identifier, is_qualified_name, package_of, simple_name};
