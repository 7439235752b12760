//! Error taxonomy shared by the sentinel crates.
//!
//! Classification and noise filtering are total and never fail; every variant
//! here originates at an I/O boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Remote repository search failed (network, rate limit, auth).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Remote or local artifact write failed.
    #[error("persist error at {path}: {message}")]
    Persist { path: String, message: String },

    /// Local filesystem primitive failed during archival.
    #[error("filesystem error: {op} {}: {source}", path.display())]
    FileSystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn fs(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileSystem {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn persist(path: impl Into<String>, message: impl ToString) -> Self {
        Error::Persist {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
