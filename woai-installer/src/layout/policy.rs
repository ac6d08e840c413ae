//! Decision points of the folder structure check.
//!
//! The library never prompts. Callers answer the two questions the check can
//! raise through a [`LayoutPolicy`]; the CLI asks the user, tests and
//! unattended runs use [`FixedPolicy`].

use std::path::Path;

/// Answers the questions raised by [`validate`](super::validate).
pub trait LayoutPolicy {
    /// The extracted packages directory is missing. Create it?
    fn confirm_create(&self, path: &Path) -> bool;

    /// The output directory already holds `entries` entries, which a merge
    /// may overwrite. Continue?
    fn confirm_overwrite(&self, output_root: &Path, entries: usize) -> bool;
}

/// A policy with fixed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPolicy {
    /// Answer to [`LayoutPolicy::confirm_create`].
    pub create_missing: bool,
    /// Answer to [`LayoutPolicy::confirm_overwrite`].
    pub allow_overwrite: bool,
}

impl FixedPolicy {
    /// Accept both creation and overwrite.
    pub fn assume_yes() -> Self {
        Self {
            create_missing: true,
            allow_overwrite: true,
        }
    }

    /// Decline both creation and overwrite.
    pub fn decline_all() -> Self {
        Self {
            create_missing: false,
            allow_overwrite: false,
        }
    }
}

impl LayoutPolicy for FixedPolicy {
    fn confirm_create(&self, _path: &Path) -> bool {
        self.create_missing
    }

    fn confirm_overwrite(&self, _output_root: &Path, _entries: usize) -> bool {
        self.allow_overwrite
    }
}

impl<P: LayoutPolicy + ?Sized> LayoutPolicy for &P {
    fn confirm_create(&self, path: &Path) -> bool {
        (**self).confirm_create(path)
    }

    fn confirm_overwrite(&self, output_root: &Path, entries: usize) -> bool {
        (**self).confirm_overwrite(output_root, entries)
    }
}
