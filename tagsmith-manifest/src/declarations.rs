//! Declaration files.
//!
//! The file-backed host reads marked declarations from a list of
//! `[[declaration]]` tables. Each entry names its marker kind and carries
//! the element description and marker arguments inline:
//!
//! ```toml
//! [[declaration]]
//! marker = "binds-view"
//! kind = "field"
//! owner = "com.example.MainActivity"
//! name = "title"
//! type = "android.widget.TextView"
//! args = { id = "title" }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tagsmith_core::{ArgValue, Element, MarkerKind, RawDeclaration, is_identifier, is_qualified_name};

use crate::{Error, Result, error::SourceContext};

/// One `[[declaration]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct DeclarationEntry {
    pub marker: MarkerKind,
    #[serde(flatten)]
    pub element: Element,
    #[serde(default)]
    pub args: IndexMap<String, ArgValue>,
}

/// A parsed declaration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeclarationFile {
    #[serde(default, rename = "declaration")]
    entries: Vec<DeclarationEntry>,
}

impl DeclarationFile {
    /// Read and parse a declaration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse declaration file content with the given filename for error reporting.
    pub fn parse(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let file: DeclarationFile = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        file.validate(&ctx)?;
        Ok(file)
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        for entry in &self.entries {
            let element = &entry.element;

            if entry.marker.as_str().is_empty() {
                return Err(ctx.validation_error("marker cannot be empty"));
            }

            if !is_identifier(&element.name) {
                return Err(ctx.invalid_name_error(
                    &element.name,
                    "element name",
                    format!("'{}' is not an identifier", element.name),
                ));
            }

            // Types may live in the default package; members always need an owner
            let owner_ok = if element.kind.is_type() {
                element.owner.is_empty() || is_qualified_name(&element.owner)
            } else {
                is_qualified_name(&element.owner)
            };
            if !owner_ok {
                return Err(ctx.validation_error_at_value(
                    format!("{} '{}' has an invalid owner", element.kind, element.name),
                    &element.owner,
                ));
            }
        }
        Ok(())
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[DeclarationEntry] {
        &self.entries
    }

    /// Marker kinds present in the file, in order of first appearance.
    pub fn markers(&self) -> Vec<MarkerKind> {
        let mut markers: Vec<MarkerKind> = Vec::new();
        for entry in &self.entries {
            if !markers.contains(&entry.marker) {
                markers.push(entry.marker.clone());
            }
        }
        markers
    }

    /// Raw declarations carrying the given marker kind, in file order.
    pub fn declarations_for(&self, marker: &MarkerKind) -> Vec<RawDeclaration> {
        self.entries
            .iter()
            .filter(|entry| &entry.marker == marker)
            .map(|entry| RawDeclaration {
                element: entry.element.clone(),
                args: entry.args.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use tagsmith_core::ElementKind;

    use super::*;

    const SAMPLE: &str = r#"
[[declaration]]
marker = "enhanced-component"
kind = "class"
owner = "com.example"
name = "MainActivity"
supertypes = ["android.app.Activity"]
args = { layout = "main" }

[[declaration]]
marker = "binds-view"
kind = "field"
owner = "com.example.MainActivity"
name = "title"
type = "android.widget.TextView"

[[declaration]]
marker = "on-click"
kind = "method"
owner = "com.example.MainActivity"
name = "saveClicked"
args = { ids = ["save", "save_all"] }

[[declaration]]
marker = "binds-view"
kind = "field"
owner = "com.example.MainActivity"
name = "list"
type = "android.widget.ListView"
args = { id = "list" }
"#;

    #[test]
    fn test_markers_in_first_appearance_order() {
        let file = DeclarationFile::parse(SAMPLE, "declarations.toml").unwrap();
        let markers: Vec<_> = file.markers().into_iter().map(|m| m.to_string()).collect();
        assert_eq!(markers, ["@enhanced-component", "@binds-view", "@on-click"]);
        assert_eq!(file.entries().len(), 4);
    }

    #[test]
    fn test_declarations_for_marker() {
        let file = DeclarationFile::parse(SAMPLE, "declarations.toml").unwrap();

        let views = file.declarations_for(&MarkerKind::new("binds-view"));
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].element.name, "title");
        assert_eq!(views[0].element.kind, ElementKind::Field);
        assert!(views[0].args.is_empty());
        assert_eq!(views[1].args["id"], ArgValue::Str("list".into()));

        let clicks = file.declarations_for(&MarkerKind::new("on-click"));
        assert_eq!(
            clicks[0].args["ids"].as_str_list(),
            Some(vec!["save", "save_all"])
        );

        let component = &file.declarations_for(&MarkerKind::new("enhanced-component"))[0];
        assert_eq!(component.element.supertypes, ["android.app.Activity"]);
        assert!(file.declarations_for(&MarkerKind::new("rest")).is_empty());
    }

    #[test]
    fn test_empty_file() {
        let file = DeclarationFile::parse("", "declarations.toml").unwrap();
        assert!(file.markers().is_empty());
    }

    #[test]
    fn test_member_without_owner_is_rejected() {
        let err = DeclarationFile::parse(
            r#"
[[declaration]]
marker = "extra"
kind = "field"
name = "id"
"#,
            "declarations.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_bad_element_name_is_rejected() {
        let err = DeclarationFile::parse(
            r#"
[[declaration]]
marker = "rest"
kind = "interface"
owner = "com.example"
name = "1Api"
"#,
            "declarations.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidName { .. }));
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = DeclarationFile::parse(
            r#"
[[declaration]]
marker = "rest"
kind = "package"
name = "api"
"#,
            "declarations.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
