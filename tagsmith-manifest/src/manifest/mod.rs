//! Manifest types and parsing for tagsmith.toml files.

mod file;
mod parse;

use std::path::PathBuf;

pub use file::TagsmithToml;
pub use parse::parse_manifest;
use serde::Deserialize;

/// Root manifest for tagsmith.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Project metadata
    pub project: ProjectConfig,

    /// Where the host inputs live
    pub sources: SourcesConfig,

    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// `[project]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Package of the compilation unit
    pub package: String,

    /// Qualified name of the application class, if the project declares one
    #[serde(default)]
    pub application: Option<String>,

    /// Components registered with the platform
    #[serde(default)]
    pub components: Vec<String>,
}

/// `[sources]` section. Relative paths are resolved against the manifest directory.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Declaration file
    pub declarations: PathBuf,

    /// Project symbol table
    pub project_symbols: PathBuf,

    /// Platform symbol table
    #[serde(default)]
    pub platform_symbols: Option<PathBuf>,
}

/// `[generation]` section
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Appended to a host type name to name its generated type
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Output directory for rendered artifacts
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            output: default_output(),
        }
    }
}

fn default_suffix() -> String {
    "_".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("generated")
}

impl Manifest {
    /// Check if a qualified type is a registered component.
    pub fn is_component(&self, qualified: &str) -> bool {
        self.project.components.iter().any(|c| c == qualified)
    }
}
