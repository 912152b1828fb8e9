//! Interfaces to the host compiler.

use eyre::Result;
use tagsmith_core::{MarkerKind, RawDeclaration, ResourceScope, SymbolEntry};
use tagsmith_ir::GenerationModel;
use thiserror::Error;

use crate::pipeline::Diagnostic;

/// Errors reading a resource symbol table from the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolSourceError {
    #[error("{scope} symbol table not found")]
    Missing { scope: ResourceScope },

    #[error("{scope} symbol table is malformed: {reason}")]
    Malformed {
        scope: ResourceScope,
        reason: String,
    },
}

/// The host compiler as seen by the pipeline.
pub trait Host {
    /// Declarations carrying `marker`, in discovery order.
    fn declarations_for(&self, marker: &MarkerKind) -> Result<Vec<RawDeclaration>>;

    /// Raw symbol table for a resource scope.
    fn symbol_table(&self, scope: ResourceScope) -> Result<Vec<SymbolEntry>, SymbolSourceError>;

    /// Diagnostic sink.
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Receives the finished generation model.
pub trait Renderer {
    /// Render the model and return the number of artifacts produced.
    fn render(&mut self, model: &GenerationModel) -> Result<usize>;
}

/// One processing round as announced by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Round {
    /// Marker kinds present in this round, in host order.
    pub markers: Vec<MarkerKind>,
    /// Set on the host's last round, which never carries work.
    pub is_final: bool,
}

impl Round {
    pub fn new(markers: impl IntoIterator<Item = MarkerKind>) -> Self {
        Self {
            markers: markers.into_iter().collect(),
            is_final: false,
        }
    }

    /// The host's closing round.
    pub fn last() -> Self {
        Self {
            markers: Vec::new(),
            is_final: true,
        }
    }

    /// Returns true when the pipeline has nothing to do in this round.
    pub fn is_idle(&self) -> bool {
        self.is_final || self.markers.is_empty()
    }
}
