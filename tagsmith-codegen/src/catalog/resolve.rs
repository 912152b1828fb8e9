//! Catalog resolution from host symbol tables.

use std::collections::{HashMap, hash_map::Entry};

use tagsmith_core::{ResourceScope, ResourceType, SymbolEntry};
use thiserror::Error;
use tracing::{debug, warn};

use super::{CatalogLayer, ResourceCatalog};
use crate::SymbolSourceError;

/// The project catalog could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("resource catalog unavailable")]
    Unavailable {
        #[source]
        source: SymbolSourceError,
    },
}

/// Build the catalog from the project and platform symbol sources.
///
/// The project source is required. A missing or malformed platform source
/// only drops the platform layer.
pub fn resolve(
    project: Result<Vec<SymbolEntry>, SymbolSourceError>,
    platform: Result<Vec<SymbolEntry>, SymbolSourceError>,
) -> Result<ResourceCatalog, CatalogError> {
    let project = project
        .and_then(|entries| build_layer(ResourceScope::Project, entries))
        .map_err(|source| CatalogError::Unavailable { source })?;

    let mut layers = vec![project];
    match platform.and_then(|entries| build_layer(ResourceScope::Platform, entries)) {
        Ok(layer) => layers.push(layer),
        Err(err) => warn!(error = %err, "continuing without platform resources"),
    }

    Ok(ResourceCatalog { layers })
}

fn build_layer(
    scope: ResourceScope,
    entries: Vec<SymbolEntry>,
) -> Result<CatalogLayer, SymbolSourceError> {
    let malformed = |reason: String| SymbolSourceError::Malformed { scope, reason };
    let mut map: HashMap<(ResourceType, String), i64> = HashMap::new();

    for entry in entries {
        let Some(ty) = ResourceType::parse(&entry.ty) else {
            debug!(%scope, ty = %entry.ty, name = %entry.name, "skipping unknown resource type");
            continue;
        };

        if entry.name.is_empty() {
            return Err(malformed(format!("empty {} name", ty)));
        }
        if entry.value < 0 {
            return Err(malformed(format!(
                "negative id {} for {}.{}",
                entry.value, ty, entry.name
            )));
        }

        match map.entry((ty, entry.name)) {
            Entry::Vacant(slot) => {
                slot.insert(entry.value);
            }
            Entry::Occupied(slot) if *slot.get() != entry.value => {
                let (ty, name) = slot.key();
                return Err(malformed(format!(
                    "{}.{} declared with ids {} and {}",
                    ty,
                    name,
                    slot.get(),
                    entry.value
                )));
            }
            Entry::Occupied(_) => {}
        }
    }

    debug!(%scope, symbols = map.len(), "built resource catalog layer");
    Ok(CatalogLayer {
        scope,
        entries: map,
    })
}
