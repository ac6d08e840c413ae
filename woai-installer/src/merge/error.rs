//! Error types for the package merge.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::collision::Collision;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that abort a merge run.
///
/// None of these are retried or skipped; the first one ends the run and the
/// destination tree keeps whatever was already written.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Failed to enumerate a source directory or inspect an entry.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to create a destination directory.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// Failed to copy a single file.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// Failed to write a synthesized `texture.cfg`.
    #[error("failed to write texture config {}: {source}", path.display())]
    ConfigWriteFailed { path: PathBuf, source: io::Error },

    /// Two packages supplied the same destination entry and strict mode is on.
    #[error("{0}")]
    Collision(Collision),

    /// The run was cancelled between packages.
    #[error("merge cancelled after {completed} of {total} packages")]
    Cancelled { completed: usize, total: usize },
}

impl MergeError {
    /// The offending path, when the error carries one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::ReadFailed { path, .. } => Some(path),
            Self::CreateDirFailed { path, .. } => Some(path),
            Self::CopyFailed { from, .. } => Some(from),
            Self::ConfigWriteFailed { path, .. } => Some(path),
            Self::Collision(_) | Self::Cancelled { .. } => None,
        }
    }
}
