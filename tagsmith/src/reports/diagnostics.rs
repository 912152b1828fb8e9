//! Diagnostics grouped by severity.

use tagsmith_codegen::pipeline::{Diagnostic, Severity};

use super::output::Output;

/// Rendered diagnostics of one run, grouped by severity.
#[derive(Debug, Default)]
pub struct DiagnosticSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

impl DiagnosticSummary {
    pub fn new(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Self::default();
        for diag in diagnostics {
            let text = diag.to_string();
            match diag.severity {
                Severity::Error => summary.errors.push(text),
                Severity::Warning => summary.warnings.push(text),
                Severity::Note => summary.notes.push(text),
            }
        }
        summary
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors and warnings go to the diagnostic stream, notes to the
    /// regular one.
    pub fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.diagnostic(error);
        }
        for warning in &self.warnings {
            out.diagnostic(warning);
        }
        for note in &self.notes {
            out.preformatted(note);
        }
        if !self.errors.is_empty() || !self.warnings.is_empty() {
            out.newline();
        }
    }
}
