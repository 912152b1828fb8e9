//! In-memory host, renderers and fixtures for tests.
//!
//! Enabled for this crate's tests and, through the `testing` feature, for
//! downstream crates.

use eyre::{Result, bail};
use indexmap::IndexMap;
use tagsmith_core::{
    ArgValue, Element, ElementKind, MarkerKind, MethodSig, Modifier, Param, RawDeclaration,
    ResourceScope, SymbolEntry,
};
use tagsmith_ir::GenerationModel;

use crate::{
    Host, ProjectContext, Registry, Renderer, Round, SymbolSourceError,
    catalog::{ResourceCatalog, resolve},
    model::{ExtractedModel, extract},
    pipeline::Diagnostic,
    validation::{ValidationContext, Validator, ValidatorRegistry},
};

/// A class declaration.
pub fn class(package: &str, name: &str) -> RawDeclaration {
    RawDeclaration::new(Element::new(ElementKind::Class, package, name))
}

/// An interface declaration.
pub fn interface(package: &str, name: &str) -> RawDeclaration {
    RawDeclaration::new(Element::new(ElementKind::Interface, package, name))
}

/// A field declaration of the given type.
pub fn field(owner: &str, name: &str, ty: &str) -> RawDeclaration {
    let mut element = Element::new(ElementKind::Field, owner, name);
    element.ty = Some(ty.to_string());
    RawDeclaration::new(element)
}

/// A void method declaration without parameters.
pub fn method(owner: &str, name: &str) -> RawDeclaration {
    RawDeclaration::new(Element::new(ElementKind::Method, owner, name))
}

/// Builder methods for test declarations.
pub trait DeclarationExt {
    fn modifier(self, modifier: Modifier) -> Self;
    fn param(self, name: &str, ty: &str) -> Self;
    /// Set the return type of a method.
    fn returns(self, ty: &str) -> Self;
    fn throws(self, ty: &str) -> Self;
    /// Declare a method on a type element.
    fn declares(self, name: &str, params: &[(&str, &str)], returns: Option<&str>) -> Self;
    fn str_arg(self, name: &str, value: &str) -> Self;
    fn int_arg(self, name: &str, value: i64) -> Self;
    fn list_arg(self, name: &str, values: &[&str]) -> Self;
}

impl DeclarationExt for RawDeclaration {
    fn modifier(mut self, modifier: Modifier) -> Self {
        self.element.modifiers.push(modifier);
        self
    }

    fn param(mut self, name: &str, ty: &str) -> Self {
        self.element.params.push(Param::new(name, ty));
        self
    }

    fn returns(mut self, ty: &str) -> Self {
        self.element.ty = Some(ty.to_string());
        self
    }

    fn throws(mut self, ty: &str) -> Self {
        self.element.throws.push(ty.to_string());
        self
    }

    fn declares(mut self, name: &str, params: &[(&str, &str)], returns: Option<&str>) -> Self {
        self.element.methods.push(MethodSig {
            name: name.to_string(),
            params: params.iter().map(|(n, t)| Param::new(*n, *t)).collect(),
            returns: returns.map(str::to_string),
        });
        self
    }

    fn str_arg(self, name: &str, value: &str) -> Self {
        self.arg(name, ArgValue::Str(value.to_string()))
    }

    fn int_arg(self, name: &str, value: i64) -> Self {
        self.arg(name, ArgValue::Int(value))
    }

    fn list_arg(self, name: &str, values: &[&str]) -> Self {
        let items = values.iter().map(|v| ArgValue::Str(v.to_string())).collect();
        self.arg(name, ArgValue::List(items))
    }
}

fn entries(symbols: &[(&str, &str, i64)]) -> Vec<SymbolEntry> {
    symbols
        .iter()
        .map(|(ty, name, value)| SymbolEntry::new(*ty, *name, *value))
        .collect()
}

/// A host backed by in-memory declarations and symbol tables.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    declarations: IndexMap<MarkerKind, Vec<RawDeclaration>>,
    project_symbols: Result<Vec<SymbolEntry>, SymbolSourceError>,
    platform_symbols: Result<Vec<SymbolEntry>, SymbolSourceError>,
    failing: Option<MarkerKind>,
    panicking: Option<MarkerKind>,
    reported: Vec<Diagnostic>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            declarations: IndexMap::new(),
            project_symbols: Ok(Vec::new()),
            platform_symbols: Ok(Vec::new()),
            failing: None,
            panicking: None,
            reported: Vec::new(),
        }
    }
}

impl MemoryHost {
    /// A host with no declarations and empty symbol tables.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(mut self, kind: MarkerKind, declaration: RawDeclaration) -> Self {
        self.declarations.entry(kind).or_default().push(declaration);
        self
    }

    /// Add project symbols as `(type, name, id)`.
    pub fn symbols(mut self, symbols: &[(&str, &str, i64)]) -> Self {
        if let Ok(table) = &mut self.project_symbols {
            table.extend(entries(symbols));
        }
        self
    }

    /// Add platform symbols as `(type, name, id)`.
    pub fn platform_symbols(mut self, symbols: &[(&str, &str, i64)]) -> Self {
        if let Ok(table) = &mut self.platform_symbols {
            table.extend(entries(symbols));
        }
        self
    }

    pub fn project_symbols_error(mut self, error: SymbolSourceError) -> Self {
        self.project_symbols = Err(error);
        self
    }

    pub fn platform_symbols_error(mut self, error: SymbolSourceError) -> Self {
        self.platform_symbols = Err(error);
        self
    }

    /// Make declaration lookup for `kind` return an error.
    pub fn fail_on(mut self, kind: MarkerKind) -> Self {
        self.failing = Some(kind);
        self
    }

    /// Make declaration lookup for `kind` panic.
    pub fn panic_on(mut self, kind: MarkerKind) -> Self {
        self.panicking = Some(kind);
        self
    }

    /// A round announcing every declared kind.
    pub fn round(&self) -> Round {
        Round::new(self.declarations.keys().cloned())
    }

    /// Diagnostics received through [`Host::report`].
    pub fn reported(&self) -> &[Diagnostic] {
        &self.reported
    }

    fn raw(&self) -> IndexMap<MarkerKind, Vec<RawDeclaration>> {
        self.declarations.clone()
    }
}

impl Host for MemoryHost {
    fn declarations_for(&self, marker: &MarkerKind) -> Result<Vec<RawDeclaration>> {
        if self.failing.as_ref() == Some(marker) {
            bail!("declaration lookup for {} failed", marker);
        }
        if self.panicking.as_ref() == Some(marker) {
            panic!("declaration lookup for {} panicked", marker);
        }
        Ok(self.declarations.get(marker).cloned().unwrap_or_default())
    }

    fn symbol_table(&self, scope: ResourceScope) -> Result<Vec<SymbolEntry>, SymbolSourceError> {
        match scope {
            ResourceScope::Project => self.project_symbols.clone(),
            ResourceScope::Platform => self.platform_symbols.clone(),
        }
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        self.reported.push(diagnostic.clone());
    }
}

/// Keeps every model it is asked to render.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub models: Vec<GenerationModel>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> usize {
        self.models.len()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, model: &GenerationModel) -> Result<usize> {
        self.models.push(model.clone());
        Ok(model.count_artifacts())
    }
}

/// Fails every render.
#[derive(Debug, Default)]
pub struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&mut self, _model: &GenerationModel) -> Result<usize> {
        bail!("output directory is not writable")
    }
}

/// Output of [`Fixture::generate`].
#[derive(Debug)]
pub struct Generated {
    pub model: GenerationModel,
    /// Validation diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

/// Declarations, symbols and project settings for exercising one rule.
#[derive(Debug, Clone)]
pub struct Fixture {
    host: MemoryHost,
    project: ProjectContext,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// A `com.example` project with empty symbol tables.
    pub fn new() -> Self {
        Self {
            host: MemoryHost::new(),
            project: ProjectContext::new("com.example"),
        }
    }

    pub fn declare(mut self, kind: MarkerKind, declaration: RawDeclaration) -> Self {
        self.host = self.host.declare(kind, declaration);
        self
    }

    pub fn symbols(mut self, symbols: &[(&str, &str, i64)]) -> Self {
        self.host = self.host.symbols(symbols);
        self
    }

    pub fn platform_symbols(mut self, symbols: &[(&str, &str, i64)]) -> Self {
        self.host = self.host.platform_symbols(symbols);
        self
    }

    /// Drop the project symbol table so no catalog can be built.
    pub fn without_catalog(mut self) -> Self {
        self.host = self.host.project_symbols_error(SymbolSourceError::Missing {
            scope: ResourceScope::Project,
        });
        self
    }

    /// Register a component in the project.
    pub fn component(mut self, qualified: &str) -> Self {
        self.project = self.project.with_component(qualified);
        self
    }

    pub fn application(mut self, qualified: &str) -> Self {
        self.project = self.project.with_application(qualified);
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.project = self.project.with_suffix(suffix);
        self
    }

    pub fn project(&self) -> &ProjectContext {
        &self.project
    }

    /// A host serving this fixture's declarations and symbols.
    pub fn host(&self) -> MemoryHost {
        self.host.clone()
    }

    pub fn round(&self) -> Round {
        self.host.round()
    }

    pub fn extracted(&self) -> ExtractedModel {
        extract(self.host.raw())
    }

    pub fn catalog(&self) -> Option<ResourceCatalog> {
        resolve(
            self.host.symbol_table(ResourceScope::Project),
            self.host.symbol_table(ResourceScope::Platform),
        )
        .ok()
    }

    /// Run one validator over the declarations of its kind.
    ///
    /// Returns the qualified names it accepted and every diagnostic.
    pub fn check(&self, validator: impl Validator + 'static) -> (Vec<String>, Vec<Diagnostic>) {
        let kind = validator.kind();
        let extracted = self.extracted();
        let catalog = self.catalog();
        let ctx = ValidationContext {
            extracted: &extracted,
            catalog: catalog.as_ref(),
            project: &self.project,
        };

        let mut diagnostics = Vec::new();
        let validated = ValidatorRegistry::new()
            .with(validator)
            .validate(&ctx, &mut diagnostics)
            .expect("validator should not fault");
        let accepted = validated
            .declarations(&kind)
            .iter()
            .map(|d| d.qualified_name())
            .collect();
        // Other kinds have no validator here and only produce "ignored" warnings
        let diagnostics = diagnostics
            .into_iter()
            .filter(|d| d.location.is_some() || d.severity.is_error())
            .collect();
        (accepted, diagnostics)
    }

    /// Validate and process with the standard registry.
    pub fn generate(&self) -> Generated {
        let registry = Registry::standard();
        let extracted = self.extracted();
        let catalog = self.catalog();
        let ctx = ValidationContext {
            extracted: &extracted,
            catalog: catalog.as_ref(),
            project: &self.project,
        };

        let mut diagnostics = Vec::new();
        let validated = registry
            .validators
            .validate(&ctx, &mut diagnostics)
            .expect("validation should not fault");
        let model = registry
            .processors
            .process(&validated, catalog.as_ref(), &self.project)
            .expect("processing should not fault");
        Generated { model, diagnostics }
    }
}
