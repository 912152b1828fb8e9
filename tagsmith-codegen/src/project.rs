//! Project-wide settings shared by validators and processors.

use tagsmith_manifest::Manifest;

use crate::SystemServices;

/// Read-only facts about the compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Package of the compilation unit.
    pub package: String,
    /// Qualified name of the application class, if any.
    pub application: Option<String>,
    /// Components registered with the platform. Empty means unchecked.
    pub components: Vec<String>,
    /// Appended to a host type name to name its generated type.
    pub suffix: String,
    pub services: SystemServices,
}

impl ProjectContext {
    /// A project with default settings.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            application: None,
            components: Vec::new(),
            suffix: "_".to_string(),
            services: SystemServices::standard(),
        }
    }

    /// Build the context from a parsed tagsmith.toml.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self {
            package: manifest.project.package.clone(),
            application: manifest.project.application.clone(),
            components: manifest.project.components.clone(),
            suffix: manifest.generation.suffix.clone(),
            services: SystemServices::standard(),
        }
    }

    /// Set the application class.
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    /// Register a component.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.components.push(component.into());
        self
    }

    /// Set the generated type suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Qualified name of the type generated for a host type.
    pub fn generated_name(&self, origin: &str) -> String {
        format!("{}{}", origin, self.suffix)
    }

    /// Whether a component is registered, or registration is unchecked.
    pub fn is_registered(&self, component: &str) -> bool {
        self.components.is_empty() || self.components.iter().any(|c| c == component)
    }
}
