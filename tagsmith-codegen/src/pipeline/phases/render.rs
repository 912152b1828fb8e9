//! Render phase - hands the generation model to the renderer.

use eyre::{Result, WrapErr, eyre};
use tracing::debug;

use crate::pipeline::{CompilationContext, Phase, PipelineState};

/// Phase that renders the finished generation model.
///
/// This phase must run after `ProcessPhase`.
pub struct RenderPhase;

impl Phase for RenderPhase {
    fn name(&self) -> &'static str {
        "render"
    }

    fn description(&self) -> &'static str {
        "Render the generation model"
    }

    fn state(&self) -> PipelineState {
        PipelineState::Rendering
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let model = ctx
            .generation
            .as_ref()
            .ok_or_else(|| eyre!("no generation model - RenderPhase must run after ProcessPhase"))?;

        ctx.artifacts = ctx
            .renderer
            .render(model)
            .wrap_err("rendering generation model")?;
        debug!(artifacts = ctx.artifacts, "rendered generation model");
        Ok(())
    }
}
