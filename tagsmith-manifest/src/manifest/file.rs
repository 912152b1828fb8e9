use std::path::{Path, PathBuf};

use super::Manifest;
use crate::{Error, Result};

/// A tagsmith.toml file with both raw content and parsed manifest.
pub struct TagsmithToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl TagsmithToml {
    /// Open and parse a tagsmith.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory containing the manifest.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Resolve a path from the manifest relative to its directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Absolute location of the declaration file.
    pub fn declarations_path(&self) -> PathBuf {
        self.resolve(&self.manifest.sources.declarations)
    }

    /// Absolute location of the project symbol table.
    pub fn project_symbols_path(&self) -> PathBuf {
        self.resolve(&self.manifest.sources.project_symbols)
    }

    /// Absolute location of the platform symbol table, if configured.
    pub fn platform_symbols_path(&self) -> Option<PathBuf> {
        self.manifest
            .sources
            .platform_symbols
            .as_deref()
            .map(|p| self.resolve(p))
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.manifest.generation.output)
    }
}
