use crate::error::Result;

/// Durable, single-call artifact write.
///
/// `path` is a forward-slash relative path such as
/// `data/tech/2025-06-01/sentinel-8h.json`; `message` describes the write for
/// commit-based backends. No retry at this layer: failures map to
/// [`crate::Error::Persist`] and propagate.
pub trait ArtifactPersist {
    fn persist(&self, path: &str, bytes: &[u8], message: &str) -> Result<()>;
}

impl<T: ArtifactPersist + ?Sized> ArtifactPersist for &T {
    fn persist(&self, path: &str, bytes: &[u8], message: &str) -> Result<()> {
        (**self).persist(path, bytes, message)
    }
}

impl<T: ArtifactPersist + ?Sized> ArtifactPersist for Box<T> {
    fn persist(&self, path: &str, bytes: &[u8], message: &str) -> Result<()> {
        (**self).persist(path, bytes, message)
    }
}
