//! Renderers for the generation model.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use tagsmith_codegen::Renderer;
use tagsmith_core::{GeneratedFile, WriteResult};
use tagsmith_ir::{GeneratedType, GenerationModel};

/// One generated type as a JSON document.
struct TypeFile<'a>(&'a GeneratedType);

impl GeneratedFile for TypeFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.json", self.0.name))
    }

    fn render(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self.0)?;
        json.push('\n');
        Ok(json)
    }
}

/// Writes `<qualified name>.json` for every generated type.
#[derive(Debug)]
pub struct JsonRenderer {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Files the last render created or changed.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Renderer for JsonRenderer {
    fn render(&mut self, model: &GenerationModel) -> Result<usize> {
        self.written.clear();
        let mut count = 0;
        for ty in model.types() {
            let file = TypeFile(ty);
            let path = file.path(&self.output_dir);
            let result = file
                .write(&self.output_dir)
                .wrap_err_with(|| format!("writing {}", path.display()))?;
            if result == WriteResult::Written {
                self.written.push(path);
            }
            count += 1;
        }
        Ok(count)
    }
}

/// A rendered file kept in memory.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

/// Renders into memory for `--dry-run`.
#[derive(Debug, Default)]
pub struct PreviewRenderer {
    pub files: Vec<PreviewFile>,
}

impl Renderer for PreviewRenderer {
    fn render(&mut self, model: &GenerationModel) -> Result<usize> {
        self.files = model
            .types()
            .map(|ty| {
                let file = TypeFile(ty);
                Ok(PreviewFile {
                    path: file.path(Path::new("")).display().to_string(),
                    content: file.render()?,
                })
            })
            .collect::<Result<_>>()?;
        Ok(self.files.len())
    }
}

/// Counts artifacts without producing them.
#[derive(Debug, Default)]
pub struct DiscardRenderer;

impl Renderer for DiscardRenderer {
    fn render(&mut self, model: &GenerationModel) -> Result<usize> {
        Ok(model.count_artifacts())
    }
}
