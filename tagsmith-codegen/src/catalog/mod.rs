//! Layered resource symbol lookup.
//!
//! The catalog is an ordered list of layers, project first and platform
//! second. A lookup walks the layers and returns the first hit together with
//! the scope it came from; nothing is merged.

mod resolve;

use std::collections::HashMap;

pub use resolve::{CatalogError, resolve};
use tagsmith_core::{ResourceScope, ResourceType};
use tagsmith_ir::ResourceRef;
use thiserror::Error;

/// A failed catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("resource R.{ty}.{name} not found in project or platform resources")]
    NotFound { ty: ResourceType, name: String },
}

/// One scope's symbols.
#[derive(Debug, Clone)]
pub struct CatalogLayer {
    scope: ResourceScope,
    entries: HashMap<(ResourceType, String), i64>,
}

impl CatalogLayer {
    pub fn scope(&self) -> ResourceScope {
        self.scope
    }

    pub fn get(&self, ty: ResourceType, name: &str) -> Option<i64> {
        self.entries.get(&(ty, name.to_string())).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resource catalog for one run.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    layers: Vec<CatalogLayer>,
}

impl ResourceCatalog {
    /// Look a symbol up, project layer first.
    pub fn lookup(&self, ty: ResourceType, name: &str) -> Result<ResourceRef, LookupError> {
        self.layers
            .iter()
            .find_map(|layer| {
                layer.get(ty, name).map(|id| ResourceRef {
                    scope: layer.scope,
                    ty,
                    name: name.to_string(),
                    id,
                })
            })
            .ok_or_else(|| LookupError::NotFound {
                ty,
                name: name.to_string(),
            })
    }

    /// Whether a layer for this scope is present.
    pub fn has_scope(&self, scope: ResourceScope) -> bool {
        self.layers.iter().any(|layer| layer.scope == scope)
    }

    /// Layers in lookup order.
    pub fn layers(&self) -> &[CatalogLayer] {
        &self.layers
    }
}
