use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ============================================================================
// Filesystem seam
// ============================================================================

/// The file operations a merge needs: existence check, read, overwrite.
pub trait ReportFs {
    fn exists(&self, path: &Path) -> bool;

    /// Raw bytes; decoding is left to the XML layer.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or overwrite `path` with `contents`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ReportFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }
}

/// In-memory filesystem for harnesses that never touch disk.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    writes: Mutex<Vec<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a text file.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.with_bytes(path, contents.into().into_bytes())
    }

    /// Seed a file with raw bytes.
    pub fn with_bytes(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files_mut().insert(path.into(), contents.into());
        self
    }

    /// A stored file as UTF-8 text, if present and valid.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        let bytes = self.files_mut().get(path.as_ref()).cloned()?;
        String::from_utf8(bytes).ok()
    }

    /// Every path passed to `write`, in call order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn files_mut(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ReportFs for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.files_mut().contains_key(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files_mut().get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_path_buf());
        self.files_mut().insert(path.to_path_buf(), contents.as_bytes().to_vec());
        Ok(())
    }
}
