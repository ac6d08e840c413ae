//! Install run orchestration.
//!
//! Ties the folder structure check, the package merge and progress accounting
//! into a single run, and reports each step as an [`InstallEvent`].
//!
//! ```text
//! Locked ─► StructureCheckStarted ─┬─► StructureCheckPassed ─► PackageStarted/Completed ... ─► RunCompleted ─► Unlocked
//!                                  └─► StructureCheckFailed ─────────────────────────────────► RunAborted ───► Unlocked
//! ```

mod error;
mod events;
mod installer;

pub use error::InstallError;
pub use events::{ControlState, InstallEvent, InstallEventCallback};
pub use installer::{Installer, RunOutcome};
