//! Extract phase - collects marked declarations from the host.

use eyre::{Result, WrapErr};
use tracing::debug;

use crate::{
    model::extract,
    pipeline::{CompilationContext, Phase, PipelineState},
};

/// Phase that asks the host for the declarations of every marker kind in
/// the round and builds the extracted model.
pub struct ExtractPhase;

impl Phase for ExtractPhase {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn description(&self) -> &'static str {
        "Collect marked declarations from the host"
    }

    fn state(&self) -> PipelineState {
        PipelineState::Extracting
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let mut raw = Vec::with_capacity(ctx.round.markers.len());
        for marker in &ctx.round.markers {
            let declarations = ctx
                .host
                .declarations_for(marker)
                .wrap_err_with(|| format!("reading {} declarations", marker))?;
            debug!(%marker, count = declarations.len(), "extracted declarations");
            raw.push((marker.clone(), declarations));
        }

        ctx.extracted = Some(extract(raw));
        Ok(())
    }
}
