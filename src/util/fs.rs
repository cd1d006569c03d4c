//! Filesystem utilities.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Names of the immediate subdirectories of `dir`, sorted by name.
pub fn list_dirs(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        bail!("directory not found: {}", dir.display());
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("failed to read directory: {}", dir.display()))?;
        if entry.file_type().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_dirs_skips_files() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::write(tmp.path().join("README.md"), "x").unwrap();

        assert_eq!(list_dirs(tmp.path()).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_list_dirs_missing() {
        let tmp = TempDir::new().unwrap();
        assert!(list_dirs(&tmp.path().join("nope")).is_err());
    }

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/docs/page.md");

        write_string(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }
}
