//! Error types for manifest scanning.
//!
//! All library operations that can fail return a [`Result<T>`], an alias for
//! `Result<T, Error>`.
//!
//! Errors fall into two groups:
//!
//! - **Run-fatal**: [`InvalidRoot`] and [`MalformedTag`] stop the whole scan.
//! - **Per-file**: [`Io`], [`Json`] and [`Walk`] are attributed to a single path;
//!   the scan logs them and moves on to the next manifest.
//!
//! [`InvalidRoot`]: Error::InvalidRoot
//! [`MalformedTag`]: Error::MalformedTag
//! [`Io`]: Error::Io
//! [`Json`]: Error::Json
//! [`Walk`]: Error::Walk

use std::path::PathBuf;

/// Result type alias for operations that may return an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for scanning and rewriting manifests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The scan root does not exist or is not a directory.
    #[error("image root {} does not exist or is not a directory", .0.display())]
    InvalidRoot(PathBuf),

    /// A `RepoTags` entry did not contain exactly one `/`.
    #[error("malformed tag {0:?}: expected exactly one '/' between registry and name")]
    MalformedTag(String),

    /// Reading or writing a manifest file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest file did not contain a valid manifest document.
    #[error("invalid manifest {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Descending into part of the tree failed.
    #[error("walking image root: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Whether this error must abort the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InvalidRoot(_) | Error::MalformedTag(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
