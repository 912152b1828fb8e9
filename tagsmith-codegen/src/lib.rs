//! Extraction, validation and processing pipeline for tagsmith.
//!
//! A round of marked host declarations flows through fixed phases:
//!
//! ```text
//! extract → resolve catalog → validate → process → render
//! ```
//!
//! Marker kinds are open. A kind exists once a [`Validator`](validation::Validator)
//! and a [`Processor`](processing::Processor) are registered for it, see
//! [`Registry::standard`].
//!
//! # Module Organization
//!
//! - [`catalog`] - Layered resource symbol lookup
//! - [`model`] - Extracted and validated declaration models
//! - [`validation`] - Validator trait, registry and built-in rules
//! - [`processing`] - Processor trait, registry, holders and built-in rules
//! - [`pipeline`] - Orchestrator, phases, diagnostics and timing
//! - [`testing`] - In-memory host and renderers (feature-gated)

pub mod catalog;
mod host;
pub mod markers;
pub mod model;
pub mod pipeline;
pub mod processing;
mod project;
mod registry;
mod services;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use host::{Host, Renderer, Round, SymbolSourceError};
pub use project::ProjectContext;
pub use registry::{Registry, RuleInfo};
pub use services::SystemServices;
