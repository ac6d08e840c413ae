//! WOAI Installer - merges extracted WOAI traffic packages for Prepar3D
//!
//! This library provides the package-merge pipeline: it validates the
//! expected `Source`/`Output` skeleton under an install root, merges aircraft
//! models, scenery and shared textures from every extracted package into a
//! single output tree, synthesizes fallback `texture.cfg` files and reports
//! progress as a single 0-100 value.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Installer                             │
//! │                                                               │
//! │  1. layout::validate ──► LayoutPolicy (create? overwrite?)    │
//! │                                                               │
//! │  2. PackageMerger, per package:                               │
//! │     ├── copy_flat   Texture/ ──► WOAI_Base/Texture_Fallback   │
//! │     ├── copy_tree   aircraft/<model> ──► Airplanes/<model>    │
//! │     │   └── write_fallback_configs (texture.*/texture.cfg)    │
//! │     └── copy_flat   scenery/world/scenery ──► WOAI Traffic    │
//! │                                                               │
//! │  3. ProgressAccumulator ──► InstallEvent callback             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline is synchronous. Callers that render progress should drive it
//! from a thread that does not block their renderer.

pub mod config;
pub mod install;
pub mod layout;
pub mod merge;
pub mod paths;
pub mod progress;

/// Library version, taken from the workspace package metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
