//! Processing pipeline for one host round.
//!
//! This module provides a [`Pipeline`] orchestrator that runs the phases from
//! declaration extraction to rendering. The pipeline provides:
//!
//! - Explicit phase boundaries (extract → resolve → validate → process → render)
//! - A single-pass guard: a pipeline does work at most once
//! - Per-phase wall-clock timing via [`TimeStats`]
//! - Unified diagnostics, returned to the caller and forwarded to the host
//!
//! Any error or panic escaping a phase ends the run with exactly one error
//! diagnostic and nothing reaches the renderer.
//!
//! # Example
//!
//! ```ignore
//! use tagsmith_codegen::{ProjectContext, Registry, pipeline::Pipeline};
//!
//! let mut pipeline = Pipeline::new(Registry::standard(), project);
//! let outcome = pipeline.run(&round, &mut host, &mut renderer);
//!
//! for diag in &outcome.diagnostics {
//!     eprintln!("{diag}");
//! }
//! pipeline.stats().log_stats();
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;
mod stats;

#[cfg(test)]
mod properties;

pub use context::CompilationContext;
pub use diagnostic::{DeclarationRef, Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use runner::{Pipeline, PipelineState, RunOutcome, RunStatus};
pub use stats::TimeStats;
