//! Bake command report data structures.

use std::{path::PathBuf, time::Duration};

use tagsmith_codegen::pipeline::RunStatus;

use super::{
    DiagnosticSummary,
    output::{Output, Report},
};
use crate::render::PreviewFile;

/// Report data from a full pipeline run.
#[derive(Debug)]
pub struct BakeReport {
    /// Package from the manifest.
    pub package: String,
    pub status: RunStatus,
    pub diagnostics: DiagnosticSummary,
    /// Wall-clock time per phase, in execution order.
    pub timings: Vec<PhaseTiming>,
    /// Wall-clock time of the whole run.
    pub total: Option<Duration>,
    /// What was rendered. None when the run failed.
    pub result: Option<GenerationResult>,
}

/// Time spent in one phase.
#[derive(Debug)]
pub struct PhaseTiming {
    pub phase: String,
    pub elapsed: Duration,
}

/// Result of rendering.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Files created or changed.
    pub files: Vec<PathBuf>,
    /// Files that already had the rendered content.
    pub unchanged: usize,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

impl BakeReport {
    pub fn is_success(&self) -> bool {
        self.status != RunStatus::Failed && !self.diagnostics.has_errors()
    }

    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.section(&format!("Generated ({})", written.files.len()));
        for file in &written.files {
            let shown = file.strip_prefix(&written.output_dir).unwrap_or(file);
            out.added_item(&shown.display().to_string());
        }
        if written.unchanged > 0 {
            out.preformatted(&format!("{} file(s) unchanged", written.unchanged));
        }
        out.newline();
        out.key_value("Output", &written.output_dir.display().to_string());
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }

    fn render_timings(&self, out: &mut dyn Output) {
        out.section("Timings");
        for timing in &self.timings {
            out.key_value_indented(&timing.phase, &format_duration(timing.elapsed));
        }
        if let Some(total) = self.total {
            out.key_value_indented("total", &format_duration(total));
        }
    }
}

fn format_duration(elapsed: Duration) -> String {
    format!("{:.2} ms", elapsed.as_secs_f64() * 1000.0)
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        self.diagnostics.render(out);

        out.preformatted(&self.package);
        out.newline();

        match &self.result {
            Some(GenerationResult::Written(written)) => self.render_written(out, written),
            Some(GenerationResult::Preview(preview)) => self.render_preview(out, preview),
            None => out.preformatted("Nothing was generated"),
        }
        out.newline();

        self.render_timings(out);
    }
}
