//! Folder structure check.
//!
//! Verifies that `Source/Extracted Packages` exists under the install root and
//! warns when `Output` already has content. The only side effect is creating
//! the packages directory, and only after the policy agreed to it.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use super::error::{LayoutError, LayoutResult};
use super::policy::LayoutPolicy;
use crate::paths::InstallPaths;

/// Side-effect-free snapshot of the folder structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutReport {
    pub root_exists: bool,
    pub packages_dir_exists: bool,
    /// Entries directly inside `Output`; 0 when it does not exist.
    pub output_entries: usize,
}

impl LayoutReport {
    /// The packages directory has to be created before a merge.
    pub fn needs_create(&self) -> bool {
        !self.packages_dir_exists
    }

    /// A merge may overwrite files already in `Output`.
    pub fn overwrite_risk(&self) -> bool {
        self.output_entries > 0
    }
}

/// Why a check ended without a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// `Output` was not empty and the policy declined to continue.
    OverwriteDeclined { entries: usize },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverwriteDeclined { entries } => write!(
                f,
                "output directory holds {} existing entries and overwriting was declined; no files have been overwritten",
                entries
            ),
        }
    }
}

/// Outcome of a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCheck {
    /// The merge may proceed.
    Ready {
        /// The packages directory was created by this check.
        created_packages_dir: bool,
        /// Entries already present in `Output`.
        existing_entries: usize,
    },
    /// The user declined to continue.
    Aborted(AbortReason),
}

impl LayoutCheck {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Probe the folder structure without changing anything.
pub fn inspect(paths: &InstallPaths) -> LayoutResult<LayoutReport> {
    Ok(LayoutReport {
        root_exists: paths.root().is_dir(),
        packages_dir_exists: paths.extracted_packages_root().is_dir(),
        output_entries: count_entries(&paths.output_root())?,
    })
}

/// Check the folder structure, consulting `policy` at each decision point.
pub fn validate(paths: &InstallPaths, policy: &dyn LayoutPolicy) -> LayoutResult<LayoutCheck> {
    info!("Starting folder structure check.");

    if !paths.root().is_dir() {
        return Err(LayoutError::RootMissing {
            path: paths.root().to_path_buf(),
        });
    }

    let packages_dir = paths.extracted_packages_root();
    let mut created_packages_dir = false;

    if !packages_dir.is_dir() {
        if !policy.confirm_create(&packages_dir) {
            warn!("Creation of {} declined", packages_dir.display());
            return Err(LayoutError::CreationDeclined { path: packages_dir });
        }

        info!("Creating {}", packages_dir.display());
        fs::create_dir_all(&packages_dir).map_err(|e| LayoutError::CreateFailed {
            path: packages_dir.clone(),
            source: e,
        })?;
        created_packages_dir = true;
    }

    if !packages_dir.is_dir() {
        return Err(LayoutError::PackagesDirMissing { path: packages_dir });
    }

    let output_root = paths.output_root();
    let existing_entries = count_entries(&output_root)?;
    if existing_entries > 0 {
        warn!(
            entries = existing_entries,
            "Output directory {} is not empty",
            output_root.display()
        );
        if !policy.confirm_overwrite(&output_root, existing_entries) {
            return Ok(LayoutCheck::Aborted(AbortReason::OverwriteDeclined {
                entries: existing_entries,
            }));
        }
    }

    info!("Folder structure check passed.");
    Ok(LayoutCheck::Ready {
        created_packages_dir,
        existing_entries,
    })
}

fn count_entries(dir: &Path) -> LayoutResult<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let entries = fs::read_dir(dir).map_err(|e| LayoutError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;
    tally_entries(dir, entries)
}

/// Count directory entries. An unreadable entry fails the count rather than
/// being skipped, so a non-empty `Output` is never reported as empty.
fn tally_entries<T>(
    dir: &Path,
    entries: impl IntoIterator<Item = io::Result<T>>,
) -> LayoutResult<usize> {
    let mut count = 0;
    for entry in entries {
        entry.map_err(|e| LayoutError::ReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        count += 1;
    }
    Ok(count)
}
