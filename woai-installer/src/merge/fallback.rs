//! Fallback texture configuration for copied models.
//!
//! When a package ships package-wide shared textures, those files are copied
//! once to `SimObjects/Airplanes/WOAI_Base/Texture_Fallback` and every
//! texture variant of every model from that package gets a `texture.cfg`
//! pointing the simulator at that directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::copier::list_dirs;
use super::error::{MergeError, MergeResult};

/// Name of the synthesized configuration file.
pub const TEXTURE_CFG_NAME: &str = "texture.cfg";

/// Directory-name prefix of texture variant folders (matched ignoring ASCII case).
pub const TEXTURE_VARIANT_PREFIX: &str = "texture.";

/// Fallback path relative to a texture variant directory.
///
/// Variants live at `Airplanes/<model>/texture.<x>`, so two levels up is
/// always `Airplanes`.
pub const FALLBACK_RELATIVE_PATH: &str = r"..\..\WOAI_Base\Texture_Fallback";

/// Full contents of a synthesized `texture.cfg`.
///
/// Prepar3D is a Windows application, so lines end with CRLF.
pub fn texture_cfg_contents() -> String {
    format!("[fltsim]\r\nfallback.1={}\r\n", FALLBACK_RELATIVE_PATH)
}

/// Whether a directory name denotes a texture variant.
///
/// # Example
///
/// ```
/// use woai_installer::merge::is_texture_variant;
///
/// assert!(is_texture_variant("texture.day"));
/// assert!(is_texture_variant("Texture.KLM"));
/// assert!(!is_texture_variant("texture"));
/// assert!(!is_texture_variant("model"));
/// ```
pub fn is_texture_variant(dir_name: &str) -> bool {
    dir_name
        .get(..TEXTURE_VARIANT_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(TEXTURE_VARIANT_PREFIX))
}

/// Write `texture.cfg` into every texture variant directly under `model_dir`.
///
/// Existing `texture.cfg` files are replaced entirely. Returns the paths
/// written, in directory-name order.
pub fn write_fallback_configs(model_dir: &Path) -> MergeResult<Vec<PathBuf>> {
    let contents = texture_cfg_contents();
    let mut written = Vec::new();

    for dir_name in list_dirs(model_dir)? {
        if !is_texture_variant(&dir_name.to_string_lossy()) {
            continue;
        }

        let cfg_path = model_dir.join(&dir_name).join(TEXTURE_CFG_NAME);
        info!("Writing texture.cfg to {}", cfg_path.display());
        fs::write(&cfg_path, &contents).map_err(|e| MergeError::ConfigWriteFailed {
            path: cfg_path.clone(),
            source: e,
        })?;
        written.push(cfg_path);
    }

    Ok(written)
}
