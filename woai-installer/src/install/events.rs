//! Events emitted during a merge run.
//!
//! The installer never touches UI state. Everything a front end needs to
//! render (progress value, status text, whether inputs should accept edits)
//! is delivered through these events.

use std::fmt;

use crate::merge::MergeReport;

/// Callback receiving every event of a run, in order.
pub type InstallEventCallback = Box<dyn Fn(&InstallEvent) + Send + Sync>;

/// Whether the front end should accept new input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    /// A run is in progress; the root path and start control must not change.
    Locked,
    /// No run in progress.
    Unlocked,
}

/// Discrete run events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    /// Input controls should be locked or unlocked.
    ControlsChanged(ControlState),
    /// The folder structure check began.
    StructureCheckStarted,
    /// The folder structure check failed or was declined.
    StructureCheckFailed { reason: String },
    /// The folder structure check passed.
    StructureCheckPassed { progress: u8 },
    /// A package is about to be merged. `index` is zero-based.
    PackageStarted {
        name: String,
        index: usize,
        total: usize,
    },
    /// A package was merged.
    PackageCompleted { name: String, progress: u8 },
    /// Every package was merged.
    RunCompleted { report: MergeReport },
    /// The run ended early. Always the last event before `ControlsChanged(Unlocked)`.
    RunAborted { reason: String },
}

impl InstallEvent {
    /// The progress value carried by this event, if any.
    pub fn progress(&self) -> Option<u8> {
        match self {
            Self::StructureCheckPassed { progress } => Some(*progress),
            Self::PackageCompleted { progress, .. } => Some(*progress),
            Self::RunCompleted { .. } => Some(crate::progress::PROGRESS_MAX),
            Self::RunAborted { .. } => Some(0),
            _ => None,
        }
    }
}

impl fmt::Display for InstallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControlsChanged(ControlState::Locked) => write!(f, "Controls locked"),
            Self::ControlsChanged(ControlState::Unlocked) => write!(f, "Controls unlocked"),
            Self::StructureCheckStarted => write!(f, "Checking folder structure"),
            Self::StructureCheckFailed { reason } => {
                write!(f, "Folder structure check failed: {}", reason)
            }
            Self::StructureCheckPassed { .. } => write!(f, "Folder structure check passed"),
            Self::PackageStarted { name, index, total } => {
                write!(f, "[{}/{}] Processing package {}", index + 1, total, name)
            }
            Self::PackageCompleted { name, progress } => {
                write!(f, "Package {} complete ({}%)", name, progress)
            }
            Self::RunCompleted { report } => write!(
                f,
                "Processing completed: {} packages, {} models",
                report.packages, report.models
            ),
            Self::RunAborted { reason } => write!(f, "Process aborted: {}", reason),
        }
    }
}
