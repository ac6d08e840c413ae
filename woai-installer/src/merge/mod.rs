//! Package merge pipeline.
//!
//! Merges every package under `Source/Extracted Packages` into the shared
//! `Output` tree:
//!
//! - `copier`: domain-agnostic recursive and flat copy primitives
//! - `fallback`: `texture.cfg` synthesis for texture variants
//! - `package`: package and model discovery, inventory scan
//! - `collision`: detection of entries supplied by more than one package
//! - `merger`: the per-package orchestration and progress stepping

mod collision;
mod copier;
mod error;
mod fallback;
mod merger;
mod package;

pub use collision::{Collision, CollisionKind, CollisionPolicy, CollisionTracker};
pub use copier::{copy_flat, copy_tree, create_dir, list_dirs, list_files, CopyStats};
pub use error::{MergeError, MergeResult};
pub use fallback::{
    is_texture_variant, texture_cfg_contents, write_fallback_configs, FALLBACK_RELATIVE_PATH,
    TEXTURE_CFG_NAME, TEXTURE_VARIANT_PREFIX,
};
pub use merger::{MergeEvent, MergeOptions, MergeReport, PackageMerger, PackageSummary};
pub use package::{discover_packages, scan_packages, Model, Package, PackageInventory};
