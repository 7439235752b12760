pub mod snapshot;

use sentinel_core::{ArtifactPersist, Error};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use snapshot::{PartitionKey, Snapshot, SnapshotConfig, SnapshotMeta, SnapshotWriter};

/// Atomic write: write to temp file in same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("no parent dir for {}", path.display()),
        )
    })?;
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Persists artifacts under a local root directory, e.g. the transient
/// working tree of a checkout.
#[derive(Debug, Clone)]
pub struct LocalPersist {
    root: PathBuf,
}

impl LocalPersist {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a forward-slash relative artifact path under the root.
    pub fn resolve(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|seg| !seg.is_empty())
            .fold(self.root.clone(), |acc, seg| acc.join(seg))
    }
}

impl ArtifactPersist for LocalPersist {
    fn persist(&self, path: &str, bytes: &[u8], message: &str) -> sentinel_core::Result<()> {
        if path.split('/').any(|seg| seg == "..") {
            return Err(Error::persist(path, "path escapes the persist root"));
        }
        let target = self.resolve(path);
        write_atomic(&target, bytes).map_err(|e| Error::persist(path, e))?;
        tracing::debug!(path = %target.display(), %message, "artifact written");
        Ok(())
    }
}
