//! Resource symbol table files.
//!
//! A symbol table maps resource type sections to `name = id` entries:
//!
//! ```toml
//! [layout]
//! main = 0x7f030000
//!
//! [id]
//! title = 0x7f050000
//! ```
//!
//! Sections are passed through verbatim, including ones tagsmith does not
//! know; the catalog resolver decides what to keep.

use std::path::Path;

use indexmap::IndexMap;
use tagsmith_core::SymbolEntry;

use crate::{Error, Result, error::SourceContext};

/// Parse a symbol table file.
pub fn read_symbols(path: impl AsRef<Path>) -> Result<Vec<SymbolEntry>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_symbols(&content, &path.display().to_string())
}

/// Parse symbol table content with the given filename for error reporting.
pub fn parse_symbols(content: &str, filename: &str) -> Result<Vec<SymbolEntry>> {
    let ctx = SourceContext::new(content, filename);
    let sections: IndexMap<String, IndexMap<String, i64>> =
        toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    Ok(sections
        .into_iter()
        .flat_map(|(ty, entries)| {
            entries
                .into_iter()
                .map(move |(name, value)| SymbolEntry::new(ty.clone(), name, value))
        })
        .collect())
}
