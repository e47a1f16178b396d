//! Filesystem materialization
//!
//! Idempotent write primitives. Directories are created but never emptied;
//! files are replaced whole through a sibling temp file so a reader never
//! sees a partial write.

use crate::error::{Result, ScaffoldError};
use crate::templates::RenderedContent;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A file the plan wants written, relative to some base directory
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub content: RenderedContent,
}

impl PlannedFile {
    pub fn new(path: impl Into<PathBuf>, content: RenderedContent) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    pub fn text(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, RenderedContent::Text(content.into()))
    }
}

/// Create `path` and any missing ancestors. No-op if it already exists.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(ScaffoldError::write(
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "exists and is not a directory"),
        ));
    }
    fs::create_dir_all(path).map_err(|e| ScaffoldError::write(path, e))
}

/// Trim incidental surrounding whitespace and end with exactly one newline
pub fn normalize_text(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

/// Write a text file, creating parent directories as needed
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, normalize_text(content).as_bytes(), None)
}

/// Serialize `document` as two-space-indented JSON with a trailing newline.
/// Key order is the document's own order.
pub fn write_structured<T: Serialize + ?Sized>(path: &Path, document: &T) -> Result<()> {
    let mut body = serde_json::to_string_pretty(document)
        .map_err(|e| ScaffoldError::write(path, io::Error::from(e)))?;
    body.push('\n');
    write_atomic(path, body.as_bytes(), None)
}

/// Write a planned file below `base`
pub fn write_planned(base: &Path, file: &PlannedFile) -> Result<()> {
    let path = base.join(&file.path);
    match &file.content {
        RenderedContent::Text(text) => write_text(&path, text),
        RenderedContent::Structured(value) => write_structured(&path, value),
    }
}

/// Copy a file byte-for-byte with its permissions, replacing any existing target
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    let bytes = fs::read(source).map_err(|e| ScaffoldError::write(source, e))?;
    write_atomic(target, &bytes, Some(source))
}

/// Remove a directory tree if present
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path).map_err(|e| ScaffoldError::write(path, e))?;
    }
    Ok(())
}

/// Replace `path` through a sibling temp file.
///
/// The result takes the permissions of `mode_source` if given, else those of
/// the file being replaced, else the usual umask-filtered default.
fn write_atomic(path: &Path, bytes: &[u8], mode_source: Option<&Path>) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    if path.is_dir() {
        return Err(ScaffoldError::write(
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "a directory occupies this path"),
        ));
    }

    let inherited = match mode_source {
        Some(source) => Some(source),
        None => Some(path).filter(|p| p.is_file()),
    };
    let permissions = inherited
        .map(|p| fs::metadata(p).map(|m| m.permissions()))
        .transpose()
        .map_err(|e| ScaffoldError::write(path, e))?;

    let mut tmp = new_temp_file(parent).map_err(|e| ScaffoldError::write(path, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.flush())
        .map_err(|e| ScaffoldError::write(path, e))?;
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| ScaffoldError::write(path, e))?;
    }
    tmp.persist(path)
        .map_err(|e| ScaffoldError::write(path, e.error))?;
    Ok(())
}

/// Created as 0666 filtered by the umask, like `fs::write`
#[cfg(unix)]
fn new_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");
        ensure_dir(&dir).unwrap();
        fs::write(dir.join("keep.txt"), "keep").unwrap();

        ensure_dir(&dir).unwrap();
        assert_eq!(fs::read_to_string(dir.join("keep.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("taken");
        fs::write(&file, "").unwrap();

        match ensure_dir(&file) {
            Err(ScaffoldError::FilesystemWriteError { path, .. }) => assert_eq!(path, file),
            other => panic!("expected write error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_text_trims_and_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("src/nested/index.ts");
        write_text(&path, "\n\n  console.log(1);\n\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "console.log(1);\n");

        write_text(&path, "export {};").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "export {};\n");
    }

    #[test]
    fn test_write_structured_keeps_insertion_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("package.json");
        write_structured(&path, &json!({ "name": "x", "version": "1.0.0", "a": 1 })).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"name\": \"x\",\n  \"version\": \"1.0.0\",\n  \"a\": 1\n}\n"
        );
    }

    #[test]
    fn test_write_over_directory_fails_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("package.json");
        fs::create_dir(&path).unwrap();

        assert!(matches!(
            write_text(&path, "{}"),
            Err(ScaffoldError::FilesystemWriteError { .. })
        ));
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_new_files_follow_umask() {
        let tmp = TempDir::new().unwrap();
        // Same umask, created the plain way
        let plain = tmp.path().join("plain.txt");
        fs::write(&plain, "x").unwrap();

        let text = tmp.path().join("packages/db/.env");
        write_text(&text, "DATABASE_URL=x").unwrap();
        let manifest = tmp.path().join("package.json");
        write_structured(&manifest, &json!({ "name": "x" })).unwrap();

        assert_eq!(mode(&text), mode(&plain));
        assert_eq!(mode(&manifest), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("start.sh");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        write_text(&path, "new").unwrap();
        assert_eq!(mode(&path), 0o755);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_carries_source_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("seed.ts");
        fs::write(&source, "export {};").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o750)).unwrap();

        let target = tmp.path().join("out/src/seed.ts");
        copy_file(&source, &target).unwrap();
        assert_eq!(mode(&target), 0o750);
        assert_eq!(fs::read_to_string(&target).unwrap(), "export {};");
    }
}
