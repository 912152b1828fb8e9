//! Core operations.
//!
//! This module contains the business logic for tagsmith commands,
//! separated from CLI argument parsing and output rendering.

pub mod bake;
pub mod check;
pub mod explain;

pub use bake::{BakeOptions, bake};
pub use check::check;
pub use explain::explain;

use tagsmith_codegen::{ProjectContext, Registry, pipeline::Pipeline};
use tagsmith_manifest::TagsmithToml;

/// A pipeline with the built-in rules for this project.
fn pipeline(toml: &TagsmithToml) -> Pipeline {
    Pipeline::new(
        Registry::standard(),
        ProjectContext::from_manifest(toml.manifest()),
    )
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::{fs, path::Path};

    use tagsmith_manifest::TagsmithToml;

    /// Write a small project and open its manifest.
    pub fn project(dir: &Path, declarations: &str, symbols: &str) -> TagsmithToml {
        fs::write(
            dir.join("tagsmith.toml"),
            r#"
[project]
package = "com.example"

[sources]
declarations = "declarations.toml"
project_symbols = "symbols.toml"
"#,
        )
        .unwrap();
        fs::write(dir.join("declarations.toml"), declarations).unwrap();
        fs::write(dir.join("symbols.toml"), symbols).unwrap();
        TagsmithToml::open(dir.join("tagsmith.toml")).unwrap()
    }

    pub const ACTIVITY: &str = r#"
[[declaration]]
marker = "enhanced-component"
kind = "class"
owner = "com.example"
name = "Main"
args = { layout = "main" }

[[declaration]]
marker = "binds-view"
kind = "field"
owner = "com.example.Main"
name = "title"
type = "android.widget.TextView"
"#;

    pub const SYMBOLS: &str = "[layout]\nmain = 1\n\n[id]\ntitle = 2\n";
}
