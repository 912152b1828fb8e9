//! Process phase - runs the processor registry.

use eyre::{Result, eyre};

use crate::pipeline::{CompilationContext, Phase, PipelineState};

/// Phase that builds the generation model from the validated declarations.
///
/// This phase must run after `ValidatePhase`.
pub struct ProcessPhase;

impl Phase for ProcessPhase {
    fn name(&self) -> &'static str {
        "process"
    }

    fn description(&self) -> &'static str {
        "Build the generation model with the registered processors"
    }

    fn state(&self) -> PipelineState {
        PipelineState::Processing
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let validated = ctx
            .validated
            .as_ref()
            .ok_or_else(|| eyre!("no validated model - ProcessPhase must run after ValidatePhase"))?;

        let model = ctx
            .registry
            .processors
            .process(validated, ctx.catalog.as_ref(), ctx.project)?;
        ctx.generation = Some(model);
        Ok(())
    }
}
