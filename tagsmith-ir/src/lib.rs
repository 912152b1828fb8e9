//! Generation model for the tagsmith code generator.
//!
//! This crate provides the structured representation of derived source
//! artifacts that processors build and renderers consume.
//!
//! # Architecture
//!
//! ```text
//! host declarations → extract → validate → process → GenerationModel → renderer
//! ```
//!
//! The model is:
//! - Structured: method bodies are [`Statement`] and [`Expr`] trees, never text
//! - Ordered: types and members keep insertion order for reproducible output
//! - Renderer-agnostic: nothing here knows about source syntax or files

mod fragment;
mod members;
mod model;
mod types;

pub use fragment::{AnonymousClass, Expr, Literal, ResourceRef, Statement};
pub use members::{ConstructorSpec, FieldSpec, MethodSpec, ParamSpec};
pub use model::{GeneratedType, GenerationModel};
pub use types::{PrimitiveType, TypeRef, Visibility};
