//! Configuration and input files for tagsmith.
//!
//! - `tagsmith.toml`: project metadata, input locations and generation settings
//! - symbol tables: `[type] name = id` resource symbol files
//! - declaration files: `[[declaration]]` lists of marked host declarations
//!
//! Every parse error is a [`miette::Diagnostic`] pointing into the offending file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod declarations;
mod error;
mod manifest;
mod symbols;

pub use declarations::{DeclarationEntry, DeclarationFile};
pub use error::{Error, Result, SourceContext};
pub use manifest::{
    GenerationConfig, Manifest, ProjectConfig, SourcesConfig, TagsmithToml, parse_manifest,
};
pub use symbols::{parse_symbols, read_symbols};
