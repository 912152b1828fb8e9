//! Diagnostic types for the pipeline.
//!
//! Diagnostics accumulate across phases and are never dropped: every one is
//! returned in the run outcome and forwarded to the host sink.

use std::fmt;

use serde::Serialize;
use tagsmith_core::{ElementKind, MarkerKind};

use crate::model::AnnotatedDeclaration;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rejects a declaration, or reports a fault.
    Error,
    /// Doesn't prevent generation but should be addressed.
    Warning,
    /// Informational message about the run.
    Note,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// The declaration a diagnostic is anchored at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationRef {
    pub marker: MarkerKind,
    pub kind: ElementKind,
    /// Qualified element name.
    pub element: String,
}

impl DeclarationRef {
    pub fn of(declaration: &AnnotatedDeclaration) -> Self {
        Self {
            marker: declaration.marker.clone(),
            kind: declaration.element.kind,
            element: declaration.qualified_name(),
        }
    }
}

impl fmt::Display for DeclarationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.marker, self.kind, self.element)
    }
}

/// A diagnostic message from a pipeline phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    /// The diagnostic message.
    pub message: String,
    /// The declaration this diagnostic is about.
    pub location: Option<DeclarationRef>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    /// Create a new note diagnostic.
    pub fn note(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Note, phase, message)
    }

    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Anchor this diagnostic at a declaration.
    pub fn at(mut self, declaration: &AnnotatedDeclaration) -> Self {
        self.location = Some(DeclarationRef::of(declaration));
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.phase, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, "\n  --> {}", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use tagsmith_core::Element;

    use super::*;

    fn title_field() -> AnnotatedDeclaration {
        AnnotatedDeclaration {
            marker: MarkerKind::new("binds-view"),
            element: Element::new(ElementKind::Field, "com.example.MainActivity", "title"),
            args: IndexMap::new(),
        }
    }

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("validate", "field must not be private");
        assert!(diag.severity.is_error());
        assert_eq!(diag.phase, "validate");
        assert!(diag.location.is_none());
    }

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning("validate", "url should start with '/'").at(&title_field());
        let location = diag.location.expect("location set");
        assert_eq!(location.element, "com.example.MainActivity#title");
        assert_eq!(location.kind, ElementKind::Field);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Note.to_string(), "note");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error("validate", "resource R.id.title not found").at(&title_field());
        insta::assert_snapshot!(diag.to_string(), @r"
        error[validate]: resource R.id.title not found
          --> @binds-view field com.example.MainActivity#title
        ");

        let note = Diagnostic::note("render", "generated 2 artifact(s)");
        insta::assert_snapshot!(note.to_string(), @"note[render]: generated 2 artifact(s)");
    }
}
