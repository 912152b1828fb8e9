//! Declaration models shared by the pipeline phases.

mod extract;

use std::{collections::HashSet, fmt, sync::Arc};

pub use extract::extract;
use indexmap::IndexMap;
use tagsmith_core::{ArgValue, Element, MarkerKind};

/// One host declaration and the arguments of one of its markers.
///
/// Immutable once extracted and shared by `Arc` with later phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedDeclaration {
    pub marker: MarkerKind,
    pub element: Element,
    pub args: IndexMap<String, ArgValue>,
}

impl AnnotatedDeclaration {
    pub fn qualified_name(&self) -> String {
        self.element.qualified_name()
    }

    pub fn arg(&self, name: &str) -> Option<&ArgValue> {
        self.args.get(name)
    }

    /// String argument, if present and a string.
    pub fn arg_str(&self, name: &str) -> Option<&str> {
        self.arg(name).and_then(ArgValue::as_str)
    }

    /// Integer argument, if present and an integer.
    pub fn arg_int(&self, name: &str) -> Option<i64> {
        self.arg(name).and_then(ArgValue::as_int)
    }
}

impl fmt::Display for AnnotatedDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.marker, self.element)
    }
}

/// Marker kind to the declarations carrying it, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ExtractedModel {
    by_kind: IndexMap<MarkerKind, Vec<Arc<AnnotatedDeclaration>>>,
    annotated: HashSet<(String, MarkerKind)>,
}

impl ExtractedModel {
    /// Declarations carrying `kind`.
    pub fn declarations(&self, kind: &MarkerKind) -> &[Arc<AnnotatedDeclaration>] {
        self.by_kind.get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the element with this qualified name carries `kind`.
    pub fn is_annotated(&self, qualified: &str, kind: &MarkerKind) -> bool {
        self.annotated
            .contains(&(qualified.to_string(), kind.clone()))
    }

    /// Marker kinds in round order.
    pub fn kinds(&self) -> impl Iterator<Item = &MarkerKind> {
        self.by_kind.keys()
    }

    /// The first declaration of the first kind, used to anchor fault diagnostics.
    pub fn first_declaration(&self) -> Option<&Arc<AnnotatedDeclaration>> {
        self.by_kind.values().find_map(|decls| decls.first())
    }

    /// Total number of declarations across kinds.
    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Declarations accepted by every validator of their kind.
#[derive(Debug, Clone, Default)]
pub struct ValidatedModel {
    by_kind: IndexMap<MarkerKind, Vec<Arc<AnnotatedDeclaration>>>,
}

impl ValidatedModel {
    pub(crate) fn accept(&mut self, declaration: Arc<AnnotatedDeclaration>) {
        self.by_kind
            .entry(declaration.marker.clone())
            .or_default()
            .push(declaration);
    }

    pub fn declarations(&self, kind: &MarkerKind) -> &[Arc<AnnotatedDeclaration>] {
        self.by_kind.get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &MarkerKind> {
        self.by_kind.keys()
    }

    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
