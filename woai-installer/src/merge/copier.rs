//! Directory copy primitives.
//!
//! Both primitives are last-writer-wins: an existing destination file is
//! overwritten without comparing contents. The first I/O failure aborts the
//! call and leaves the destination partially populated.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use super::error::{MergeError, MergeResult};

/// Totals for a completed copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Regular files copied.
    pub files: usize,
    /// Directories visited below the copy root (the root itself excluded).
    pub directories: usize,
    /// Bytes written.
    pub bytes: u64,
}

impl CopyStats {
    /// Fold another set of totals into this one.
    pub fn add(&mut self, other: CopyStats) {
        self.files += other.files;
        self.directories += other.directories;
        self.bytes += other.bytes;
    }
}

/// Recursively copy `source` into `dest`.
///
/// `dest` and any missing ancestors are created. Files already present in
/// `dest` that have no counterpart in `source` are left untouched.
pub fn copy_tree(source: &Path, dest: &Path) -> MergeResult<CopyStats> {
    let mut stats = CopyStats::default();
    copy_tree_into(source, dest, &mut stats)?;
    Ok(stats)
}

fn copy_tree_into(source: &Path, dest: &Path, stats: &mut CopyStats) -> MergeResult<()> {
    create_dir(dest)?;

    for entry in read_dir_sorted(source)? {
        let source_path = source.join(&entry.name);
        let dest_path = dest.join(&entry.name);

        if entry.is_dir {
            stats.directories += 1;
            copy_tree_into(&source_path, &dest_path, stats)?;
        } else {
            stats.bytes += copy_file(&source_path, &dest_path)?;
            stats.files += 1;
        }
    }

    Ok(())
}

/// Copy the regular files directly inside `source` into `dest`.
///
/// Sub-directories of `source` are ignored. `dest` must already exist.
/// Returns the names of the copied files in copy order.
pub fn copy_flat(source: &Path, dest: &Path) -> MergeResult<(Vec<OsString>, CopyStats)> {
    let mut names = Vec::new();
    let mut stats = CopyStats::default();

    for entry in read_dir_sorted(source)? {
        if entry.is_dir {
            continue;
        }
        let dest_path = dest.join(&entry.name);
        stats.bytes += copy_file(&source.join(&entry.name), &dest_path)?;
        stats.files += 1;
        names.push(entry.name);
    }

    Ok((names, stats))
}

/// Names of the regular files directly inside `dir`, sorted.
///
/// A missing directory yields an empty list.
pub fn list_files(dir: &Path) -> MergeResult<Vec<OsString>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    Ok(read_dir_sorted(dir)?
        .into_iter()
        .filter(|entry| !entry.is_dir)
        .map(|entry| entry.name)
        .collect())
}

/// Names of the directories directly inside `dir`, sorted.
///
/// A missing directory yields an empty list.
pub fn list_dirs(dir: &Path) -> MergeResult<Vec<OsString>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    Ok(read_dir_sorted(dir)?
        .into_iter()
        .filter(|entry| entry.is_dir)
        .map(|entry| entry.name)
        .collect())
}

/// Create a directory and all missing ancestors.
pub fn create_dir(path: &Path) -> MergeResult<()> {
    fs::create_dir_all(path).map_err(|e| MergeError::CreateDirFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

struct DirEntryInfo {
    name: OsString,
    is_dir: bool,
}

/// Read a directory and sort its entries by name.
///
/// Symlinks are followed when classifying entries so a linked model
/// directory is copied like a real one.
fn read_dir_sorted(dir: &Path) -> MergeResult<Vec<DirEntryInfo>> {
    let read_err = |e| MergeError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|e| MergeError::ReadFailed {
            path: path.clone(),
            source: e,
        })?;
        entries.push(DirEntryInfo {
            name: entry.file_name(),
            is_dir: metadata.is_dir(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn copy_file(source: &Path, dest: &Path) -> MergeResult<u64> {
    fs::copy(source, dest).map_err(|e| MergeError::CopyFailed {
        from: source.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })
}
