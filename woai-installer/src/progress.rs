//! Whole-run progress accounting.
//!
//! A run reports a single integer in `0..=100`. The structure check moves the
//! value to a small constant, then each completed package moves it to
//! `floor(100 * completed / total)`. Integer arithmetic guarantees the value
//! reaches exactly 100 after the last package, and taking the maximum with the
//! current value keeps it non-decreasing when the structure-check constant is
//! larger than the first package step.
//!
//! # State Machine
//!
//! ```text
//!          start()                finish()
//!   Idle ──────────► Running ──────────────► Done
//!    ▲                  │                      │
//!    │                  │ abort()              │
//!    │                  ▼                      │
//!    └──── reset() ── Aborted ◄────────────────┘ reset()
//! ```

use std::fmt;

use tracing::debug;

/// Progress value reported once the folder structure check has passed.
pub const STRUCTURE_CHECK_PROGRESS: u8 = 10;

/// Maximum progress value.
pub const PROGRESS_MAX: u8 = 100;

/// Lifecycle phase of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// No run in progress.
    Idle,
    /// A run is in progress.
    Running,
    /// All packages processed.
    Done,
    /// The run ended early; the value was reset to 0.
    Aborted,
}

impl RunPhase {
    /// Whether the phase ends a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Ready",
            Self::Running => "Processing",
            Self::Done => "Done",
            Self::Aborted => "Aborted",
        };
        f.write_str(name)
    }
}

/// Monotonic 0-100 progress for one run.
#[derive(Debug, Clone)]
pub struct ProgressAccumulator {
    phase: RunPhase,
    value: u8,
    total_packages: usize,
    completed_packages: usize,
}

impl Default for ProgressAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressAccumulator {
    pub fn new() -> Self {
        Self {
            phase: RunPhase::Idle,
            value: 0,
            total_packages: 0,
            completed_packages: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Current value in `0..=100`.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Packages completed so far in this run.
    pub fn completed_packages(&self) -> usize {
        self.completed_packages
    }

    /// Begin a run at 0.
    pub fn start(&mut self) {
        self.phase = RunPhase::Running;
        self.value = 0;
        self.total_packages = 0;
        self.completed_packages = 0;
    }

    /// Record that the folder structure check passed.
    pub fn structure_checked(&mut self) -> u8 {
        self.advance_to(STRUCTURE_CHECK_PROGRESS)
    }

    /// Set the number of packages the run will process.
    pub fn begin_packages(&mut self, total: usize) {
        self.total_packages = total;
        self.completed_packages = 0;
    }

    /// Record one completed package and return the new value.
    pub fn package_completed(&mut self) -> u8 {
        self.completed_packages = (self.completed_packages + 1).min(self.total_packages);
        let target = package_progress(self.completed_packages, self.total_packages);
        self.advance_to(target)
    }

    /// End the run successfully. The value becomes 100.
    pub fn finish(&mut self) -> u8 {
        self.advance_to(PROGRESS_MAX);
        self.phase = RunPhase::Done;
        self.value
    }

    /// End the run early. The value resets to 0.
    pub fn abort(&mut self) {
        self.phase = RunPhase::Aborted;
        self.value = 0;
    }

    /// Return to idle after a run, optionally keeping the reached value.
    pub fn reset(&mut self, retain_value: bool) {
        self.phase = RunPhase::Idle;
        if !retain_value {
            self.value = 0;
        }
        self.total_packages = 0;
        self.completed_packages = 0;
    }

    fn advance_to(&mut self, target: u8) -> u8 {
        if self.phase == RunPhase::Running && target > self.value {
            debug!("Updating progress to {}", target);
            self.value = target.min(PROGRESS_MAX);
        }
        self.value
    }
}

/// `floor(100 * completed / total)`, or 100 when there is nothing to do.
///
/// # Example
///
/// ```
/// use woai_installer::progress::package_progress;
///
/// assert_eq!(package_progress(1, 4), 25);
/// assert_eq!(package_progress(2, 3), 66);
/// assert_eq!(package_progress(3, 3), 100);
/// ```
pub fn package_progress(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return PROGRESS_MAX;
    }
    let completed = completed.min(total) as u128;
    ((completed * u128::from(PROGRESS_MAX)) / total as u128) as u8
}
