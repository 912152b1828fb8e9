//! Per-declaration check helpers.

use tagsmith_core::{Element, ElementKind, MarkerKind, ResourceType};
use tagsmith_ir::ResourceRef;

use super::{PHASE, ValidationContext};
use crate::{model::AnnotatedDeclaration, pipeline::Diagnostic};

/// Collects the verdict and diagnostics of one validator on one declaration.
///
/// Any [`error`](Checks::error) rejects the declaration. The boolean helpers
/// return whether the check passed so rules can stop early.
///
/// [`enclosed_by`](Checks::enclosed_by) and [`also_marked`](Checks::also_marked)
/// record the declaration they depend on. A declaration whose owner is later
/// rejected is dropped as well.
pub struct Checks<'a> {
    declaration: &'a AnnotatedDeclaration,
    context: &'a ValidationContext<'a>,
    diagnostics: Vec<Diagnostic>,
    owners: Vec<Owner>,
    rejected: bool,
}

/// A declaration another one depends on: the element and the marker it must
/// carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner {
    pub element: String,
    pub marker: MarkerKind,
}

impl<'a> Checks<'a> {
    pub fn new(declaration: &'a AnnotatedDeclaration, context: &'a ValidationContext<'a>) -> Self {
        Self {
            declaration,
            context,
            diagnostics: Vec::new(),
            owners: Vec::new(),
            rejected: false,
        }
    }

    pub fn declaration(&self) -> &'a AnnotatedDeclaration {
        self.declaration
    }

    pub fn element(&self) -> &'a Element {
        &self.declaration.element
    }

    pub fn context(&self) -> &'a ValidationContext<'a> {
        self.context
    }

    fn marker(&self) -> &'a MarkerKind {
        &self.declaration.marker
    }

    /// Reject the declaration.
    pub fn error(&mut self, message: impl Into<String>) {
        self.rejected = true;
        self.diagnostics
            .push(Diagnostic::error(PHASE, message).at(self.declaration));
    }

    /// Report a problem without rejecting.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::warning(PHASE, message).at(self.declaration));
    }

    pub fn is_rejected(&self) -> bool {
        self.rejected
    }

    /// Declarations this one depends on.
    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    /// Record that this declaration needs `element` to be accepted with `marker`.
    pub fn depends_on(&mut self, element: String, marker: &MarkerKind) {
        let owner = Owner {
            element,
            marker: marker.clone(),
        };
        if !self.owners.contains(&owner) {
            self.owners.push(owner);
        }
    }

    /// Verdict and diagnostics.
    pub fn finish(self) -> (bool, Vec<Diagnostic>) {
        (!self.rejected, self.diagnostics)
    }

    /// The element is one of `kinds`.
    pub fn element_kind(&mut self, kinds: &[ElementKind]) -> bool {
        let kind = self.element().kind;
        if kinds.contains(&kind) {
            return true;
        }
        let expected: Vec<String> = kinds.iter().map(ToString::to_string).collect();
        self.error(format!(
            "{} can only be used on a {}, found {}",
            self.marker(),
            expected.join(" or "),
            kind
        ));
        false
    }

    pub fn not_private(&mut self) -> bool {
        self.forbid(self.element().is_private(), "private")
    }

    pub fn not_static(&mut self) -> bool {
        self.forbid(self.element().is_static(), "static")
    }

    pub fn not_final(&mut self) -> bool {
        self.forbid(self.element().is_final(), "final")
    }

    pub fn not_abstract(&mut self) -> bool {
        self.forbid(self.element().is_abstract(), "abstract")
    }

    fn forbid(&mut self, present: bool, modifier: &str) -> bool {
        if present {
            self.error(format!(
                "{} cannot be used on a {} {}",
                self.marker(),
                modifier,
                self.element().kind
            ));
        }
        !present
    }

    pub fn returns_void(&mut self) -> bool {
        if self.element().returns_void() {
            return true;
        }
        self.error(format!("{} method must return void", self.marker()));
        false
    }

    pub fn no_params(&mut self) -> bool {
        let count = self.element().params.len();
        if count == 0 {
            return true;
        }
        self.error(format!(
            "{} method must have no parameters, found {}",
            self.marker(),
            count
        ));
        false
    }

    pub fn no_throws(&mut self) -> bool {
        if self.element().throws.is_empty() {
            return true;
        }
        self.error(format!(
            "{} method must not declare checked exceptions ({})",
            self.marker(),
            self.element().throws.join(", ")
        ));
        false
    }

    /// The enclosing type carries `kind`.
    pub fn enclosed_by(&mut self, kind: &MarkerKind) -> bool {
        let enclosing = self.element().enclosing_type().unwrap_or_default();
        if self.context.extracted.is_annotated(enclosing, kind) {
            self.depends_on(enclosing.to_string(), kind);
            return true;
        }
        self.error(format!(
            "{} can only be used in a type marked {}",
            self.marker(),
            kind
        ));
        false
    }

    /// The element itself also carries `kind`.
    pub fn also_marked(&mut self, kind: &MarkerKind) -> bool {
        let qualified = self.declaration.qualified_name();
        if self.context.extracted.is_annotated(&qualified, kind) {
            self.depends_on(qualified, kind);
            return true;
        }
        self.error(format!(
            "{} requires the {} to also be marked {}",
            self.marker(),
            self.element().kind,
            kind
        ));
        false
    }

    /// The element does not also carry `other`.
    pub fn not_combined_with(&mut self, other: &MarkerKind) -> bool {
        let qualified = self.declaration.qualified_name();
        if !self.context.extracted.is_annotated(&qualified, other) {
            return true;
        }
        self.error(format!(
            "{} cannot be combined with {}",
            self.marker(),
            other
        ));
        false
    }

    /// Optional string argument. Present but not a string is an error.
    pub fn optional_str(&mut self, name: &str) -> Option<&'a str> {
        let value = self.declaration.arg(name)?;
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.error(format!(
                    "{} argument '{}' must be a string, found {}",
                    self.marker(),
                    name,
                    value
                ));
                None
            }
        }
    }

    /// String argument, or `default` when absent. None when present but not a string.
    pub fn str_or(&mut self, name: &str, default: &'a str) -> Option<&'a str> {
        match self.declaration.arg(name) {
            None => Some(default),
            Some(_) => self.optional_str(name),
        }
    }

    /// Declared type of a field.
    pub fn field_type(&mut self) -> Option<&'a str> {
        let ty = self.element().ty.as_deref();
        if ty.is_none() {
            self.error(format!("{} field has no declared type", self.marker()));
        }
        ty
    }

    /// Optional list of strings. A single string counts as a one-element list.
    pub fn optional_str_list(&mut self, name: &str) -> Option<Vec<&'a str>> {
        let value = self.declaration.arg(name)?;
        match value.as_str_list() {
            Some(items) => Some(items),
            None => {
                self.error(format!(
                    "{} argument '{}' must be a string or a list of strings, found {}",
                    self.marker(),
                    name,
                    value
                ));
                None
            }
        }
    }

    /// Optional integer argument. Present but not an integer is an error.
    pub fn optional_int(&mut self, name: &str) -> Option<i64> {
        let value = self.declaration.arg(name)?;
        match value.as_int() {
            Some(i) => Some(i),
            None => {
                self.error(format!(
                    "{} argument '{}' must be an integer, found {}",
                    self.marker(),
                    name,
                    value
                ));
                None
            }
        }
    }

    /// Resolve a resource, rejecting when it is unknown or no catalog exists.
    pub fn resource(&mut self, ty: ResourceType, name: &str) -> Option<ResourceRef> {
        let Some(catalog) = self.context.catalog else {
            self.error(format!(
                "cannot resolve R.{}.{}: resource catalog unavailable",
                ty, name
            ));
            return None;
        };
        match catalog.lookup(ty, name) {
            Ok(resource) => Some(resource),
            Err(err) => {
                self.error(err.to_string());
                None
            }
        }
    }
}
