//! Check command report data structures.

use std::path::PathBuf;

use tagsmith_codegen::pipeline::RunStatus;

use super::{
    DiagnosticSummary,
    output::{Output, Report},
};

/// Report data from a pipeline run that renders nothing.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub status: RunStatus,
    pub diagnostics: DiagnosticSummary,
    /// Number of artifacts a bake would produce.
    pub artifacts: usize,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.status != RunStatus::Failed && !self.diagnostics.has_errors()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        self.diagnostics.render(out);

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid, {} artifact(s) would be generated",
                self.config_path.display(),
                self.artifacts
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_valid_report() {
        let report = CheckReport {
            config_path: PathBuf::from("tagsmith.toml"),
            status: RunStatus::Completed,
            diagnostics: DiagnosticSummary {
                notes: vec!["note[render]: generated 2 artifact(s)".into()],
                ..Default::default()
            },
            artifacts: 2,
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "note[render]: generated 2 artifact(s)",
                "✓ tagsmith.toml is valid, 2 artifact(s) would be generated",
            ]
        );
    }

    #[test]
    fn test_failed_run_is_invalid() {
        let report = CheckReport {
            config_path: PathBuf::from("tagsmith.toml"),
            status: RunStatus::Failed,
            diagnostics: DiagnosticSummary::default(),
            artifacts: 0,
        };
        assert!(!report.is_valid());
    }
}
