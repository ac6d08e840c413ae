//! Error types for the folder structure check.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Fatal folder structure problems, raised before anything is copied.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The install root is missing or is not a directory.
    #[error("install root {} does not exist or is not a directory", path.display())]
    RootMissing { path: PathBuf },

    /// The extracted packages directory is missing and creating it was declined.
    #[error(
        "could not find directory {}; create the directory structure manually and retry",
        path.display()
    )]
    CreationDeclined { path: PathBuf },

    /// Creating the extracted packages directory failed.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateFailed { path: PathBuf, source: io::Error },

    /// The extracted packages directory is still missing after the create step.
    #[error("extracted packages directory {} does not exist", path.display())]
    PackagesDirMissing { path: PathBuf },

    /// Failed to inspect a directory.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },
}
