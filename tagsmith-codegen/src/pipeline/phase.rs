//! Pipeline phase trait.

use eyre::Result;
use serde::Serialize;

use super::{CompilationContext, PipelineState};

/// Information about a pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseInfo {
    /// The phase name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A phase in the processing pipeline.
///
/// Phases are executed in order by the pipeline. Each phase reads what the
/// earlier phases left in the compilation context, adds its own result and
/// records diagnostics.
///
/// Built-in phases:
/// - `ExtractPhase` - collects marked declarations from the host
/// - `ResolvePhase` - builds the resource catalog
/// - `ValidatePhase` - runs the validator registry
/// - `ProcessPhase` - runs the processor registry
/// - `RenderPhase` - hands the generation model to the renderer
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and timings).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// The pipeline state while this phase runs.
    fn state(&self) -> PipelineState;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error on an unexpected fault, which ends the run.
    /// Rejected declarations and tolerated failures should be recorded as
    /// diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()>;

    /// Get information about this phase.
    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
