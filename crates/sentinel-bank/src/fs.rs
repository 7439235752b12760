//! Filesystem primitives the mover is written against.
//!
//! Every method is synchronous and maps OS failures to
//! [`sentinel_core::Error::FileSystem`] carrying the operation and path.

use sentinel_core::{Error, Result};
use std::path::{Path, PathBuf};

/// One directory listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

pub trait ArchiveFs {
    fn exists(&self, path: &Path) -> bool;
    /// Immediate children in directory-listing order (not sorted).
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Byte-exact copy, overwriting `to`. Returns bytes copied.
    fn copy(&self, from: &Path, to: &Path) -> Result<u64>;
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    /// Recursive, forced removal of a directory tree.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
}

/// `std::fs`-backed implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl ArchiveFs for StdFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let read = std::fs::read_dir(path).map_err(|e| Error::fs("read_dir", path, e))?;
        let mut out = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| Error::fs("read_dir", path, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| Error::fs("stat", entry.path(), e))?;
            out.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path(),
                is_dir: file_type.is_dir(),
            });
        }
        Ok(out)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| Error::fs("create_dir_all", path, e))
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<u64> {
        std::fs::copy(from, to).map_err(|e| Error::fs("copy", from, e))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| Error::fs("read", path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).map_err(|e| Error::fs("remove_file", path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::remove_dir_all(path).map_err(|e| Error::fs("remove_dir_all", path, e))
    }
}
