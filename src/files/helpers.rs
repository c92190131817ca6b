use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const TEMP_PREFIX: &str = "gitkit-";

/// What a path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Dir,
}

/// Probe a path; `None` when it does not exist (or is neither file nor dir)
pub fn exists(path: impl AsRef<Path>) -> Option<PathKind> {
    let metadata = fs::metadata(path).ok()?;
    if metadata.is_file() {
        Some(PathKind::File)
    } else if metadata.is_dir() {
        Some(PathKind::Dir)
    } else {
        None
    }
}

/// Read a file to a string; `None` if it does not exist
pub fn read_file_sync(path: impl AsRef<Path>) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn read_file(path: impl AsRef<Path>) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Create or overwrite a file, creating missing parent directories
pub fn write_file_sync(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub async fn write_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}

pub fn touch_file_sync(path: impl AsRef<Path>) -> Result<()> {
    write_file_sync(path, "")
}

/// Create `path` if missing
///
/// With `must_be_empty`, anything already inside the directory is removed.
pub fn ensure_dir(path: impl AsRef<Path>, must_be_empty: bool) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path)?;

    if must_be_empty {
        for entry in fs::read_dir(path)? {
            let entry_path = entry?.path();
            if entry_path.is_dir() && !entry_path.is_symlink() {
                fs::remove_dir_all(&entry_path)?;
            } else {
                fs::remove_file(&entry_path)?;
            }
        }
    }

    Ok(())
}

/// Allocate a fresh temp directory; it is never removed by gitkit
pub fn new_temp_dir() -> Result<PathBuf> {
    new_temp_dir_with_prefix(TEMP_PREFIX)
}

pub fn new_temp_dir_with_prefix(prefix: &str) -> Result<PathBuf> {
    let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
    Ok(dir.keep())
}

/// Allocate a fresh, empty temp file; it is never removed by gitkit
pub fn new_temp_file() -> Result<PathBuf> {
    let file = tempfile::Builder::new().prefix(TEMP_PREFIX).tempfile()?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path)
}

/// Remove a file or directory tree; missing paths are fine
pub fn remove_path(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match exists(path) {
        Some(PathKind::Dir) => fs::remove_dir_all(path)?,
        Some(PathKind::File) => fs::remove_file(path)?,
        None => {}
    }
    Ok(())
}

pub fn assert(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::Assertion(message.to_string()))
    }
}

pub fn assert_file_exists(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match exists(path) {
        Some(PathKind::File) => Ok(()),
        _ => Err(Error::MissingFile(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exists() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        assert_eq!(exists(temp.path()), Some(PathKind::Dir));
        assert_eq!(exists(&file), Some(PathKind::File));
        assert_eq!(exists(temp.path().join("nope")), None);
    }

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        assert_eq!(read_file_sync(temp.path().join("nope")).unwrap(), None);
    }

    #[test]
    fn test_write_creates_parents() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a/b/c.txt");

        write_file_sync(&file, "nested").unwrap();
        assert_eq!(read_file_sync(&file).unwrap().as_deref(), Some("nested"));
    }

    #[tokio::test]
    async fn test_async_write_and_read() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("dir/async.txt");

        write_file(&file, "async content").await.unwrap();
        assert_eq!(read_file(&file).await.unwrap().as_deref(), Some("async content"));
        assert_eq!(read_file(temp.path().join("nope")).await.unwrap(), None);
    }

    #[test]
    fn test_touch_overwrites_with_empty() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("touched");
        write_file_sync(&file, "old").unwrap();

        touch_file_sync(&file).unwrap();
        assert_eq!(read_file_sync(&file).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_ensure_dir_clears_contents() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("target");
        write_file_sync(dir.join("old.txt"), "old").unwrap();
        write_file_sync(dir.join("sub/deeper.txt"), "old").unwrap();

        ensure_dir(&dir, true).unwrap();

        assert_eq!(exists(&dir), Some(PathKind::Dir));
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_ensure_dir_keeps_contents() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("target");
        write_file_sync(dir.join("keep.txt"), "keep").unwrap();

        ensure_dir(&dir, false).unwrap();
        assert_eq!(exists(dir.join("keep.txt")), Some(PathKind::File));
    }

    #[test]
    fn test_temp_paths_are_distinct_and_persist() {
        let dir_a = new_temp_dir().unwrap();
        let dir_b = new_temp_dir().unwrap();
        let file = new_temp_file().unwrap();

        assert_ne!(dir_a, dir_b);
        assert_eq!(exists(&dir_a), Some(PathKind::Dir));
        assert_eq!(exists(&file), Some(PathKind::File));

        for path in [&dir_a, &dir_b, &file] {
            remove_path(path).unwrap();
            assert_eq!(exists(path), None);
        }
    }

    #[test]
    fn test_assertions() {
        assert!(assert(true, "fine").is_ok());
        let err = assert(false, "broken invariant").unwrap_err();
        assert_eq!(err.to_string(), "Assertion failed: broken invariant");

        let temp = TempDir::new().unwrap();
        assert!(matches!(
            assert_file_exists(temp.path()),
            Err(Error::MissingFile(_))
        ));
    }
}
