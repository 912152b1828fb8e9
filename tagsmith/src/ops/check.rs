//! Check operation - a pipeline run that writes nothing.

use eyre::Result;
use tagsmith_manifest::TagsmithToml;

use super::pipeline;
use crate::{
    host::FileHost,
    render::DiscardRenderer,
    reports::{CheckReport, DiagnosticSummary},
};

/// Execute the check operation.
///
/// Runs every phase with a renderer that only counts artifacts.
pub fn check(toml: &TagsmithToml, mut host: FileHost) -> Result<CheckReport> {
    let mut pipeline = pipeline(toml);
    let outcome = pipeline.run(&host.round(), &mut host, &mut DiscardRenderer);

    Ok(CheckReport {
        config_path: toml.path().to_path_buf(),
        status: outcome.status,
        diagnostics: DiagnosticSummary::new(&outcome.diagnostics),
        artifacts: outcome.artifacts,
    })
}
