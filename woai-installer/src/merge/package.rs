//! Discovery of extracted packages and their contents.
//!
//! Packages, models and texture variants are found by directory enumeration at
//! the start of every run and never persisted. Entries are returned sorted by
//! name so the merge order (and therefore last-package-wins resolution and the
//! progress event sequence) is the same on every platform.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::copier::{list_dirs, list_files};
use super::error::MergeResult;
use crate::paths::{package_aircraft_dir, package_scenery_dir, package_texture_dir};

/// One extracted package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Directory name, used in logs and events.
    pub name: String,
    /// Absolute path of the package directory.
    pub path: PathBuf,
}

/// One aircraft model directory inside a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Directory name, which is also the destination directory name.
    pub name: String,
    /// Absolute path of the model directory.
    pub path: PathBuf,
}

impl Model {
    /// Raw directory name, used to build the destination path.
    pub fn dir_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

impl Package {
    fn from_dir(parent: &Path, dir_name: OsString) -> Self {
        Self {
            name: dir_name.to_string_lossy().into_owned(),
            path: parent.join(dir_name),
        }
    }

    /// `<package>/aircraft`
    pub fn aircraft_dir(&self) -> PathBuf {
        package_aircraft_dir(&self.path)
    }

    /// `<package>/scenery/world/scenery`
    pub fn scenery_dir(&self) -> PathBuf {
        package_scenery_dir(&self.path)
    }

    /// `<package>/Texture`
    pub fn texture_dir(&self) -> PathBuf {
        package_texture_dir(&self.path)
    }

    /// Model directories under `aircraft`, empty when the package has none.
    pub fn models(&self) -> MergeResult<Vec<Model>> {
        let aircraft_dir = self.aircraft_dir();
        Ok(list_dirs(&aircraft_dir)?
            .into_iter()
            .map(|dir_name| Model {
                name: dir_name.to_string_lossy().into_owned(),
                path: aircraft_dir.join(dir_name),
            })
            .collect())
    }

    /// File names of the package-wide shared textures.
    pub fn shared_textures(&self) -> MergeResult<Vec<OsString>> {
        list_files(&self.texture_dir())
    }

    /// File names of the flat scenery file set.
    pub fn scenery_files(&self) -> MergeResult<Vec<OsString>> {
        list_files(&self.scenery_dir())
    }
}

/// List every package under the extracted-packages root, sorted by name.
pub fn discover_packages(packages_root: &Path) -> MergeResult<Vec<Package>> {
    Ok(list_dirs(packages_root)?
        .into_iter()
        .map(|dir_name| Package::from_dir(packages_root, dir_name))
        .collect())
}

/// Summary of one package's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInventory {
    pub name: String,
    pub path: PathBuf,
    /// Model directory names, sorted.
    pub models: Vec<String>,
    pub scenery_files: usize,
    pub shared_textures: usize,
}

impl PackageInventory {
    /// Whether models from this package receive fallback `texture.cfg` files.
    pub fn needs_fallback(&self) -> bool {
        self.shared_textures > 0
    }

    /// Whether the package contributes nothing to the output.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.scenery_files == 0 && self.shared_textures == 0
    }
}

/// Inventory every package under the extracted-packages root without copying.
pub fn scan_packages(packages_root: &Path) -> MergeResult<Vec<PackageInventory>> {
    discover_packages(packages_root)?
        .into_iter()
        .map(|package| {
            Ok(PackageInventory {
                models: package.models()?.into_iter().map(|m| m.name).collect(),
                scenery_files: package.scenery_files()?.len(),
                shared_textures: package.shared_textures()?.len(),
                name: package.name,
                path: package.path,
            })
        })
        .collect()
}
