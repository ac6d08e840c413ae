//! Centralized install tree naming conventions.
//!
//! Every path the installer reads from or writes to is derived here from a
//! single install root. Nothing is stored besides the root itself, so the
//! derived locations can never drift apart.
//!
//! # Layout
//!
//! ```text
//! <root>/Source/Extracted Packages/<package>/aircraft/<model>/...
//! <root>/Source/Extracted Packages/<package>/scenery/world/scenery/*
//! <root>/Source/Extracted Packages/<package>/Texture/*
//! <root>/Output/SimObjects/Airplanes/<model>/...
//! <root>/Output/SimObjects/Airplanes/WOAI_Base/Texture_Fallback/*
//! <root>/Output/WOAI Traffic/scenery/*
//! ```

use std::path::{Path, PathBuf};

/// Directory under the root holding all input material.
pub const SOURCE_DIR: &str = "Source";

/// Directory under [`SOURCE_DIR`] holding one directory per extracted package.
pub const EXTRACTED_PACKAGES_DIR: &str = "Extracted Packages";

/// Directory under the root receiving the merged tree.
pub const OUTPUT_DIR: &str = "Output";

/// Package sub-directory holding one directory per aircraft model.
pub const PACKAGE_AIRCRAFT_DIR: &str = "aircraft";

/// Package sub-directory holding package-wide shared textures.
pub const PACKAGE_TEXTURE_DIR: &str = "Texture";

/// Name of the base model directory that hosts the fallback textures.
pub const BASE_MODEL_DIR: &str = "WOAI_Base";

/// Name of the fallback texture directory inside [`BASE_MODEL_DIR`].
pub const TEXTURE_FALLBACK_DIR: &str = "Texture_Fallback";

/// Derived paths for one install root.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use woai_installer::paths::InstallPaths;
///
/// let paths = InstallPaths::new("/sim/woai");
/// assert_eq!(
///     paths.extracted_packages_root(),
///     Path::new("/sim/woai/Source/Extracted Packages")
/// );
/// assert_eq!(
///     paths.scenery_output_root(),
///     Path::new("/sim/woai/Output/WOAI Traffic/scenery")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    root: PathBuf,
}

impl InstallPaths {
    /// Create the path set for the given install root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The user-chosen install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/Source`
    pub fn source_root(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    /// `<root>/Source/Extracted Packages`
    pub fn extracted_packages_root(&self) -> PathBuf {
        self.source_root().join(EXTRACTED_PACKAGES_DIR)
    }

    /// `<root>/Output`
    pub fn output_root(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// `<root>/Output/WOAI Traffic/scenery`
    pub fn scenery_output_root(&self) -> PathBuf {
        self.output_root().join("WOAI Traffic").join("scenery")
    }

    /// `<root>/Output/SimObjects/Airplanes`
    pub fn airplanes_root(&self) -> PathBuf {
        self.output_root().join("SimObjects").join("Airplanes")
    }

    /// Destination directory for a single model.
    pub fn model_output_dir(&self, model_name: &str) -> PathBuf {
        self.airplanes_root().join(model_name)
    }

    /// `<root>/Output/SimObjects/Airplanes/WOAI_Base/Texture_Fallback`
    pub fn texture_fallback_root(&self) -> PathBuf {
        self.airplanes_root()
            .join(BASE_MODEL_DIR)
            .join(TEXTURE_FALLBACK_DIR)
    }
}

/// `<package>/aircraft`
pub fn package_aircraft_dir(package_dir: &Path) -> PathBuf {
    package_dir.join(PACKAGE_AIRCRAFT_DIR)
}

/// `<package>/scenery/world/scenery`
pub fn package_scenery_dir(package_dir: &Path) -> PathBuf {
    package_dir.join("scenery").join("world").join("scenery")
}

/// `<package>/Texture`
pub fn package_texture_dir(package_dir: &Path) -> PathBuf {
    package_dir.join(PACKAGE_TEXTURE_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_paths() {
        let paths = InstallPaths::new("/data/woai");
        assert_eq!(paths.source_root(), PathBuf::from("/data/woai/Source"));
        assert_eq!(
            paths.extracted_packages_root(),
            PathBuf::from("/data/woai/Source/Extracted Packages")
        );
    }

    #[test]
    fn test_output_paths() {
        let paths = InstallPaths::new("/data/woai");
        assert_eq!(paths.output_root(), PathBuf::from("/data/woai/Output"));
        assert_eq!(
            paths.model_output_dir("WOAI_B738"),
            PathBuf::from("/data/woai/Output/SimObjects/Airplanes/WOAI_B738")
        );
        assert_eq!(
            paths.texture_fallback_root(),
            PathBuf::from("/data/woai/Output/SimObjects/Airplanes/WOAI_Base/Texture_Fallback")
        );
    }

    #[test]
    fn test_derived_paths_never_touch_filesystem() {
        let paths = InstallPaths::new("/definitely/not/there");
        assert!(!paths.root().exists());
        assert!(paths
            .scenery_output_root()
            .starts_with("/definitely/not/there/Output"));
    }

    #[test]
    fn test_package_sub_paths() {
        let package = Path::new("/pkgs/PkgA");
        assert_eq!(
            package_aircraft_dir(package),
            PathBuf::from("/pkgs/PkgA/aircraft")
        );
        assert_eq!(
            package_scenery_dir(package),
            PathBuf::from("/pkgs/PkgA/scenery/world/scenery")
        );
        assert_eq!(
            package_texture_dir(package),
            PathBuf::from("/pkgs/PkgA/Texture")
        );
    }
}
