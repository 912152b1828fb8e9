//! Compilation context passed through pipeline phases.

use tagsmith_ir::GenerationModel;

use super::diagnostic::{DeclarationRef, Diagnostic};
use crate::{
    Host, ProjectContext, Registry, Renderer, Round,
    catalog::ResourceCatalog,
    model::{ExtractedModel, ValidatedModel},
};

/// Context passed through all pipeline phases.
///
/// This struct carries the state of one run through each phase,
/// accumulating results and diagnostics along the way.
pub struct CompilationContext<'a> {
    pub round: &'a Round,
    pub project: &'a ProjectContext,
    pub registry: &'a Registry,
    pub host: &'a mut dyn Host,
    pub renderer: &'a mut dyn Renderer,
    /// Marked declarations (populated by ExtractPhase).
    pub extracted: Option<ExtractedModel>,
    /// The resource catalog (populated by ResolvePhase when the project
    /// symbol table is usable).
    pub catalog: Option<ResourceCatalog>,
    /// Accepted declarations (populated by ValidatePhase).
    pub validated: Option<ValidatedModel>,
    /// The generation model (populated by ProcessPhase).
    pub generation: Option<GenerationModel>,
    /// Number of artifacts the renderer produced.
    pub artifacts: usize,
    /// Diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CompilationContext<'a> {
    pub fn new(
        round: &'a Round,
        project: &'a ProjectContext,
        registry: &'a Registry,
        host: &'a mut dyn Host,
        renderer: &'a mut dyn Renderer,
    ) -> Self {
        Self {
            round,
            project,
            registry,
            host,
            renderer,
            extracted: None,
            catalog: None,
            validated: None,
            generation: None,
            artifacts: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Add a warning diagnostic.
    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    /// Add a note diagnostic.
    pub fn add_note(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::note(phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Where a fault diagnostic is anchored: the first extracted
    /// declaration, or the host's first declaration of the round's first
    /// marker when extraction never finished.
    pub fn fault_anchor(&self) -> Option<DeclarationRef> {
        if let Some(first) = self
            .extracted
            .as_ref()
            .and_then(|extracted| extracted.first_declaration())
        {
            return Some(DeclarationRef::of(first));
        }

        let marker = self.round.markers.first()?;
        let host = &*self.host;
        let declarations = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            host.declarations_for(marker)
        }))
        .ok()?
        .ok()?;
        let first = declarations.into_iter().next()?;
        Some(DeclarationRef {
            marker: marker.clone(),
            kind: first.element.kind,
            element: first.element.qualified_name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        markers::ENHANCED_COMPONENT,
        pipeline::Severity,
        testing::{MemoryHost, RecordingRenderer, class},
    };

    #[test]
    fn test_context_diagnostics() {
        let round = Round::new([ENHANCED_COMPONENT]);
        let project = ProjectContext::new("com.example");
        let registry = Registry::new();
        let mut host = MemoryHost::new();
        let mut renderer = RecordingRenderer::default();
        let mut ctx =
            CompilationContext::new(&round, &project, &registry, &mut host, &mut renderer);

        ctx.add_warning("resolve", "test warning");
        ctx.add_note("render", "test note");
        ctx.add_diagnostic(Diagnostic::error("validate", "test error"));

        let severities: Vec<_> = ctx.diagnostics.iter().map(|d| d.severity).collect();
        assert_eq!(
            severities,
            [Severity::Warning, Severity::Note, Severity::Error]
        );
    }

    #[test]
    fn test_fault_anchor_falls_back_to_host() {
        let round = Round::new([ENHANCED_COMPONENT]);
        let project = ProjectContext::new("com.example");
        let registry = Registry::new();
        let mut host = MemoryHost::new().declare(ENHANCED_COMPONENT, class("com.example", "Main"));
        let mut renderer = RecordingRenderer::default();
        let ctx = CompilationContext::new(&round, &project, &registry, &mut host, &mut renderer);

        let anchor = ctx.fault_anchor().expect("anchor");
        assert_eq!(anchor.element, "com.example.Main");
        assert_eq!(anchor.marker, ENHANCED_COMPONENT);
    }

    #[test]
    fn test_fault_anchor_without_declarations() {
        let round = Round::new([ENHANCED_COMPONENT]);
        let project = ProjectContext::new("com.example");
        let registry = Registry::new();
        let mut host = MemoryHost::new().fail_on(ENHANCED_COMPONENT);
        let mut renderer = RecordingRenderer::default();
        let ctx = CompilationContext::new(&round, &project, &registry, &mut host, &mut renderer);

        assert!(ctx.fault_anchor().is_none());
    }
}
