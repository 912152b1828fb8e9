//! Processing of validated declarations into the generation model.
//!
//! Processors run strictly in registration order over one shared
//! [`GenerationModel`]. Cross-kind coordination goes through [`Holders`]:
//! a processor that needs a holder another processor should have registered
//! treats its absence as a fault.

mod holders;
pub mod rules;

use eyre::{Result, WrapErr, eyre};
use tagsmith_core::{MarkerKind, ResourceType};
use tagsmith_ir::{GeneratedType, GenerationModel, ResourceRef, Statement};
use tracing::debug;

pub use holders::{ComponentHolder, HolderError, Holders, RestClientHolder};

use crate::{
    ProjectContext, RuleInfo,
    catalog::ResourceCatalog,
    model::{AnnotatedDeclaration, ValidatedModel},
};

/// Mutable state threaded through every processor of a run.
pub struct ProcessingContext<'a> {
    pub model: GenerationModel,
    pub holders: Holders,
    catalog: Option<&'a ResourceCatalog>,
    project: &'a ProjectContext,
}

impl<'a> ProcessingContext<'a> {
    pub fn new(catalog: Option<&'a ResourceCatalog>, project: &'a ProjectContext) -> Self {
        Self {
            model: GenerationModel::new(),
            holders: Holders::default(),
            catalog,
            project,
        }
    }

    pub fn project(&self) -> &'a ProjectContext {
        self.project
    }

    /// Resolve a resource that validation already checked.
    pub fn resource(&self, ty: ResourceType, name: &str) -> Result<ResourceRef> {
        let catalog = self
            .catalog
            .ok_or_else(|| eyre!("cannot resolve R.{}.{}: resource catalog unavailable", ty, name))?;
        Ok(catalog.lookup(ty, name)?)
    }

    /// The generated subclass of a component.
    pub fn component_type(&mut self, origin: &str) -> Result<&mut GeneratedType> {
        let generated = self.holders.component(origin)?.generated.clone();
        self.model
            .type_mut(&generated)
            .ok_or_else(|| eyre!("generated type {} is missing from the model", generated))
    }

    /// A labelled section of a component's `onCreate`.
    pub fn section(&mut self, origin: &str, label: &str) -> Result<&mut Vec<Statement>> {
        let ty = self.component_type(origin)?;
        let name = ty.name.clone();
        ty.method_mut(rules::ON_CREATE)
            .and_then(|method| method.section_mut(label))
            .ok_or_else(|| eyre!("{}.{} has no '{}' section", name, rules::ON_CREATE, label))
    }

    /// The generated client of a REST interface.
    pub fn rest_client_type(&mut self, interface: &str) -> Result<&mut GeneratedType> {
        let generated = self.holders.rest_client(interface)?.generated.clone();
        self.model
            .type_mut(&generated)
            .ok_or_else(|| eyre!("generated type {} is missing from the model", generated))
    }
}

/// Contributes the declarations of one marker kind to the generation model.
pub trait Processor: Send + Sync {
    /// The marker kind this processor is bound to.
    fn kind(&self) -> MarkerKind;

    /// A human-readable description of what is generated.
    fn description(&self) -> &'static str;

    /// Process one validated declaration.
    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()>;

    /// Get information about this processor.
    fn info(&self) -> RuleInfo {
        RuleInfo {
            kind: self.kind(),
            description: self.description(),
        }
    }
}

/// Ordered collection of processors.
#[derive(Default)]
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn Processor>>,
}

impl ProcessorRegistry {
    /// Create a registry with no processors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a processor.
    pub fn with(mut self, processor: impl Processor + 'static) -> Self {
        self.register(processor);
        self
    }

    /// Add a processor. Registration order is execution order.
    pub fn register(&mut self, processor: impl Processor + 'static) {
        debug!(kind = %processor.kind(), "registered processor");
        self.processors.push(Box::new(processor));
    }

    /// Get information about all registered processors.
    pub fn info(&self) -> Vec<RuleInfo> {
        self.processors.iter().map(|p| p.info()).collect()
    }

    pub fn handles(&self, kind: &MarkerKind) -> bool {
        self.processors.iter().any(|p| &p.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Run every processor over its validated declarations.
    pub fn process(
        &self,
        validated: &ValidatedModel,
        catalog: Option<&ResourceCatalog>,
        project: &ProjectContext,
    ) -> Result<GenerationModel> {
        let mut ctx = ProcessingContext::new(catalog, project);

        for processor in &self.processors {
            let kind = processor.kind();
            let declarations = validated.declarations(&kind);
            for declaration in declarations {
                processor
                    .process(declaration, &mut ctx)
                    .wrap_err_with(|| format!("processing {}", declaration))?;
            }
            debug!(%kind, count = declarations.len(), "processed marker kind");
        }

        Ok(ctx.model)
    }
}
