//! Bake operation - render the generation model as JSON.

use std::path::Path;

use eyre::Result;
use tagsmith_codegen::pipeline::{Pipeline, RunOutcome, RunStatus};
use tagsmith_manifest::TagsmithToml;

use super::pipeline;
use crate::{
    host::FileHost,
    render::{JsonRenderer, PreviewRenderer},
    reports::{
        BakeReport, DiagnosticSummary, GenerationResult, PhaseTiming, PreviewResult, WrittenResult,
    },
};

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Output directory, overriding `[generation].output`.
    pub output_dir: Option<&'a Path>,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the bake operation.
///
/// Runs every phase and renders one JSON document per generated type.
pub fn bake(toml: &TagsmithToml, mut host: FileHost, opts: BakeOptions) -> Result<BakeReport> {
    let mut pipeline = pipeline(toml);
    let round = host.round();

    let (outcome, result) = if opts.dry_run {
        let mut renderer = PreviewRenderer::default();
        let outcome = pipeline.run(&round, &mut host, &mut renderer);
        let result = GenerationResult::Preview(PreviewResult {
            files: renderer.files,
        });
        (outcome, result)
    } else {
        let output_dir = opts
            .output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| toml.output_dir());
        let mut renderer = JsonRenderer::new(output_dir);
        let outcome = pipeline.run(&round, &mut host, &mut renderer);
        let files = renderer.written().to_vec();
        let result = GenerationResult::Written(WrittenResult {
            output_dir: renderer.output_dir().to_path_buf(),
            unchanged: outcome.artifacts.saturating_sub(files.len()),
            files,
        });
        (outcome, result)
    };

    Ok(report(toml, &pipeline, outcome, result))
}

fn report(
    toml: &TagsmithToml,
    pipeline: &Pipeline,
    outcome: RunOutcome,
    result: GenerationResult,
) -> BakeReport {
    let timings = pipeline
        .stats()
        .entries()
        .map(|(phase, elapsed)| PhaseTiming {
            phase: phase.to_string(),
            elapsed,
        })
        .collect();

    BakeReport {
        package: toml.manifest().project.package.clone(),
        status: outcome.status,
        diagnostics: DiagnosticSummary::new(&outcome.diagnostics),
        timings,
        total: pipeline.stats().total(),
        result: (outcome.status == RunStatus::Completed).then_some(result),
    }
}
