//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use tagsmith_core::{is_identifier, is_qualified_name};

use super::Manifest;
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "tagsmith.toml")
    }
}

impl Manifest {
    /// Parse a tagsmith.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a tagsmith.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, &source_ctx)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let project = &manifest.project;

    if !is_qualified_name(&project.package) {
        return Err(ctx.invalid_name_error(
            &project.package,
            "package",
            "each dot-separated segment must be an identifier",
        ));
    }

    if let Some(application) = &project.application
        && !is_qualified_name(application)
    {
        return Err(ctx.invalid_name_error(
            application,
            "application class",
            "expected a qualified class name",
        ));
    }

    for component in &project.components {
        if !is_qualified_name(component) {
            return Err(ctx.invalid_name_error(
                component,
                "component",
                "expected a qualified class name",
            ));
        }
    }

    let suffix = &manifest.generation.suffix;
    if suffix.is_empty() {
        return Err(ctx.validation_error("generation.suffix cannot be empty"));
    }
    // The suffix is appended to a type name, so "Name" + suffix must stay an identifier
    if !is_identifier(&format!("A{suffix}")) {
        return Err(ctx.invalid_name_error(
            suffix,
            "suffix",
            "the suffix must continue an identifier",
        ));
    }

    Ok(())
}
