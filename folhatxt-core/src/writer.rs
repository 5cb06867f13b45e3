//! Writer module for saving the generated TXT

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputDocument;

/// Write a document to disk and return the path written.
///
/// An existing directory receives the document under its own file name;
/// anything else is used as the file path itself.
pub fn write_document<P: AsRef<Path>>(document: &OutputDocument, target: P) -> Result<PathBuf> {
    let target = target.as_ref();
    let path = if target.is_dir() {
        target.join(&document.file_name)
    } else {
        target.to_path_buf()
    };

    fs::write(&path, document.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> OutputDocument {
        OutputDocument {
            file_name: "Resultado - 12345678 - 032024.txt".to_string(),
            text: "12345678000199|01032024|31032024|\n010|1750,00|\n".to_string(),
        }
    }

    #[test]
    fn test_write_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(&document(), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("Resultado - 12345678 - 032024.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), document().text);
    }

    #[test]
    fn test_write_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("saida.txt");
        let path = write_document(&document(), &target).unwrap();

        assert_eq!(path, target);
        assert!(fs::read_to_string(&target).unwrap().ends_with("010|1750,00|\n"));
    }

    #[test]
    fn test_write_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("saida.txt");
        assert!(write_document(&document(), &target).is_err());
    }
}
