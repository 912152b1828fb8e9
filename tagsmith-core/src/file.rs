use std::{
    fs, io,
    path::{Path, PathBuf},
};

use eyre::Result;

/// An artifact rendered to a file under an output directory.
pub trait GeneratedFile {
    /// Path of the artifact under `base`.
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content.
    fn render(&self) -> Result<String>;

    /// Write the artifact, leaving the file untouched when its content is
    /// already current.
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        let content = self.render()?;

        match fs::read_to_string(&path) {
            Ok(existing) if existing == content => return Ok(WriteResult::Unchanged),
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(WriteResult::Written)
    }
}

/// Result of [`GeneratedFile::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was created or its content replaced
    Written,
    /// File already had the rendered content
    Unchanged,
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    struct Note {
        name: &'static str,
        body: &'static str,
    }

    impl GeneratedFile for Note {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("notes").join(self.name)
        }

        fn render(&self) -> Result<String> {
            Ok(self.body.to_string())
        }
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let note = Note {
            name: "a.json",
            body: "first",
        };

        assert_eq!(note.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("notes/a.json")).unwrap(),
            "first"
        );
    }

    #[test]
    fn test_same_content_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let note = Note {
            name: "b.json",
            body: "same",
        };

        note.write(temp.path()).unwrap();
        assert_eq!(note.write(temp.path()).unwrap(), WriteResult::Unchanged);
    }

    #[test]
    fn test_changed_content_is_rewritten() {
        let temp = TempDir::new().unwrap();
        let first = Note {
            name: "c.json",
            body: "old",
        };
        let second = Note {
            body: "new",
            ..first
        };

        first.write(temp.path()).unwrap();
        assert_eq!(second.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("notes/c.json")).unwrap(),
            "new"
        );
    }
}
