//! Resolve phase - builds the resource catalog.

use eyre::Result;
use tagsmith_core::ResourceScope;

use crate::{
    catalog::{CatalogError, resolve},
    pipeline::{CompilationContext, Phase, PipelineState},
};

/// Phase that resolves the layered resource catalog from the host's symbol
/// tables.
///
/// An unusable project symbol table is not a fault: the run continues
/// without a catalog and every resource-dependent declaration is rejected
/// during validation.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Resolve the project and platform resource catalog"
    }

    fn state(&self) -> PipelineState {
        PipelineState::ResolvingCatalog
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let project = ctx.host.symbol_table(ResourceScope::Project);
        let platform = ctx.host.symbol_table(ResourceScope::Platform);

        match resolve(project, platform) {
            Ok(catalog) => {
                if !catalog.has_scope(ResourceScope::Platform) {
                    ctx.add_note(
                        self.name(),
                        "platform resources unavailable, resolving against project resources only",
                    );
                }
                ctx.catalog = Some(catalog);
            }
            Err(CatalogError::Unavailable { source }) => {
                ctx.add_warning(
                    self.name(),
                    format!("resource catalog unavailable: {}", source),
                );
            }
        }
        Ok(())
    }
}
