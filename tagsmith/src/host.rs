//! Host backed by the files named in tagsmith.toml.

use std::path::PathBuf;

use eyre::Result;
use tagsmith_codegen::{Host, Round, SymbolSourceError, pipeline::Diagnostic};
use tagsmith_core::{MarkerKind, RawDeclaration, ResourceScope, SymbolEntry};
use tagsmith_manifest::{DeclarationFile, TagsmithToml, read_symbols};
use tracing::debug;

/// Serves declarations from the declaration file and symbols from the
/// symbol table files.
///
/// Declarations are parsed up front. Symbol tables are read when the
/// pipeline asks for them, so a missing or broken table is reported through
/// [`SymbolSourceError`] instead of failing the command.
#[derive(Debug)]
pub struct FileHost {
    declarations: DeclarationFile,
    project_symbols: PathBuf,
    platform_symbols: Option<PathBuf>,
}

impl FileHost {
    pub fn open(toml: &TagsmithToml) -> tagsmith_manifest::Result<Self> {
        Ok(Self {
            declarations: DeclarationFile::open(toml.declarations_path())?,
            project_symbols: toml.project_symbols_path(),
            platform_symbols: toml.platform_symbols_path(),
        })
    }

    /// The single round this host announces.
    pub fn round(&self) -> Round {
        Round::new(self.declarations.markers())
    }
}

impl Host for FileHost {
    fn declarations_for(&self, marker: &MarkerKind) -> Result<Vec<RawDeclaration>> {
        Ok(self.declarations.declarations_for(marker))
    }

    fn symbol_table(&self, scope: ResourceScope) -> Result<Vec<SymbolEntry>, SymbolSourceError> {
        let path = match scope {
            ResourceScope::Project => Some(&self.project_symbols),
            ResourceScope::Platform => self.platform_symbols.as_ref(),
        };
        let Some(path) = path else {
            return Err(SymbolSourceError::Missing { scope });
        };

        read_symbols(path).map_err(|err| {
            if err.is_not_found() {
                SymbolSourceError::Missing { scope }
            } else {
                SymbolSourceError::Malformed {
                    scope,
                    reason: err.to_string(),
                }
            }
        })
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        debug!(
            severity = %diagnostic.severity,
            phase = %diagnostic.phase,
            "{}",
            diagnostic.message
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn project(dir: &TempDir, manifest: &str) -> TagsmithToml {
        let path = dir.path().join("tagsmith.toml");
        fs::write(&path, manifest).unwrap();
        fs::write(
            dir.path().join("declarations.toml"),
            r#"
[[declaration]]
marker = "enhanced-component"
kind = "class"
owner = "com.example"
name = "Main"
"#,
        )
        .unwrap();
        TagsmithToml::open(&path).unwrap()
    }

    const MANIFEST: &str = r#"
[project]
package = "com.example"

[sources]
declarations = "declarations.toml"
project_symbols = "symbols.toml"
platform_symbols = "platform.toml"
"#;

    #[test]
    fn test_round_lists_declared_markers() {
        let dir = TempDir::new().unwrap();
        let host = FileHost::open(&project(&dir, MANIFEST)).unwrap();
        let round = host.round();
        assert_eq!(round.markers, [MarkerKind::new("enhanced-component")]);
        assert!(!round.is_final);
    }

    #[test]
    fn test_missing_symbol_file() {
        let dir = TempDir::new().unwrap();
        let host = FileHost::open(&project(&dir, MANIFEST)).unwrap();
        assert_eq!(
            host.symbol_table(ResourceScope::Project),
            Err(SymbolSourceError::Missing {
                scope: ResourceScope::Project
            })
        );
    }

    #[test]
    fn test_malformed_symbol_file() {
        let dir = TempDir::new().unwrap();
        let host = FileHost::open(&project(&dir, MANIFEST)).unwrap();
        fs::write(dir.path().join("platform.toml"), "[id]\ntext1 = \"one\"\n").unwrap();

        let err = host.symbol_table(ResourceScope::Platform).unwrap_err();
        assert!(matches!(
            err,
            SymbolSourceError::Malformed {
                scope: ResourceScope::Platform,
                ..
            }
        ));
    }

    #[test]
    fn test_reads_symbols() {
        let dir = TempDir::new().unwrap();
        let host = FileHost::open(&project(&dir, MANIFEST)).unwrap();
        fs::write(dir.path().join("symbols.toml"), "[id]\ntitle = 10\n").unwrap();

        let symbols = host.symbol_table(ResourceScope::Project).unwrap();
        assert_eq!(symbols, [SymbolEntry::new("id", "title", 10)]);
    }

    #[test]
    fn test_platform_table_is_optional() {
        let dir = TempDir::new().unwrap();
        let manifest = MANIFEST.replace("platform_symbols = \"platform.toml\"\n", "");
        let host = FileHost::open(&project(&dir, &manifest)).unwrap();
        assert_eq!(
            host.symbol_table(ResourceScope::Platform),
            Err(SymbolSourceError::Missing {
                scope: ResourceScope::Platform
            })
        );
    }
}
