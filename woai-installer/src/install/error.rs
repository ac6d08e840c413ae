//! Installer error types.

use thiserror::Error;

use crate::layout::LayoutError;
use crate::merge::MergeError;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The folder structure check failed before any copying.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Copying or config synthesis failed during the merge.
    #[error(transparent)]
    Merge(#[from] MergeError),
}

impl InstallError {
    /// Whether the run ended because it was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Merge(MergeError::Cancelled { .. }))
    }
}
