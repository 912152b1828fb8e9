//! Validate phase - runs the validator registry.

use eyre::{Result, eyre};

use crate::{
    pipeline::{CompilationContext, Phase, PipelineState},
    validation::{PHASE, ValidationContext},
};

/// Phase that checks every extracted declaration against the validators of
/// its kind.
///
/// This phase must run after `ExtractPhase`. Rejections become error
/// diagnostics; only accepted declarations reach the validated model.
pub struct ValidatePhase;

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        PHASE
    }

    fn description(&self) -> &'static str {
        "Check declarations against the registered validators"
    }

    fn state(&self) -> PipelineState {
        PipelineState::Validating
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let extracted = ctx
            .extracted
            .as_ref()
            .ok_or_else(|| eyre!("no extracted model - ValidatePhase must run after ExtractPhase"))?;

        let validation = ValidationContext {
            extracted,
            catalog: ctx.catalog.as_ref(),
            project: ctx.project,
        };
        let validated = ctx
            .registry
            .validators
            .validate(&validation, &mut ctx.diagnostics)?;

        ctx.validated = Some(validated);
        Ok(())
    }
}
