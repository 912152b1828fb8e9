//! Per-run coordination state shared between processors.

use indexmap::IndexMap;
use thiserror::Error;

/// A holder another processor was expected to register is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HolderError {
    #[error("no component holder for {origin}: its @enhanced-component declaration was not processed")]
    MissingComponent { origin: String },

    #[error("no REST client holder for {interface}: its @rest declaration was not processed")]
    MissingRestClient { interface: String },
}

/// A host component and its generated subclass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHolder {
    pub origin: String,
    pub generated: String,
}

/// A REST interface and its generated client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestClientHolder {
    pub interface: String,
    pub generated: String,
}

/// Holders registered during one run, keyed by host type.
#[derive(Debug, Clone, Default)]
pub struct Holders {
    components: IndexMap<String, ComponentHolder>,
    rest_clients: IndexMap<String, RestClientHolder>,
}

impl Holders {
    pub fn register_component(&mut self, holder: ComponentHolder) {
        self.components.insert(holder.origin.clone(), holder);
    }

    pub fn component(&self, origin: &str) -> Result<&ComponentHolder, HolderError> {
        self.components
            .get(origin)
            .ok_or_else(|| HolderError::MissingComponent {
                origin: origin.to_string(),
            })
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentHolder> {
        self.components.values()
    }

    pub fn register_rest_client(&mut self, holder: RestClientHolder) {
        self.rest_clients.insert(holder.interface.clone(), holder);
    }

    pub fn rest_client(&self, interface: &str) -> Result<&RestClientHolder, HolderError> {
        self.rest_clients
            .get(interface)
            .ok_or_else(|| HolderError::MissingRestClient {
                interface: interface.to_string(),
            })
    }
}
