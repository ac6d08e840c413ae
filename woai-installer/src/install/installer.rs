//! Run orchestration.
//!
//! An [`Installer`] owns the progress state of one install root and drives a
//! run through the folder structure check and the package merge, translating
//! each step into an [`InstallEvent`].

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::error::InstallError;
use super::events::{ControlState, InstallEvent, InstallEventCallback};
use crate::layout::{validate, AbortReason, LayoutCheck, LayoutPolicy};
use crate::merge::{MergeEvent, MergeOptions, MergeReport, PackageMerger};
use crate::paths::InstallPaths;
use crate::progress::ProgressAccumulator;

/// How a run ended without a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every package was merged.
    Completed(MergeReport),
    /// The user declined to continue at the structure check.
    Aborted(AbortReason),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Drives merge runs for one install root.
///
/// # Example
///
/// ```no_run
/// use woai_installer::install::Installer;
/// use woai_installer::layout::FixedPolicy;
///
/// let mut installer = Installer::new("/opt/woai")
///     .with_event_callback(Box::new(|event| println!("{}", event)));
/// let outcome = installer.run(&FixedPolicy::assume_yes())?;
/// println!("{:?}", outcome);
/// # Ok::<(), woai_installer::install::InstallError>(())
/// ```
pub struct Installer {
    paths: InstallPaths,
    options: MergeOptions,
    cancel: CancellationToken,
    progress: ProgressAccumulator,
    on_event: Option<InstallEventCallback>,
}

impl Installer {
    /// Create an installer for the given root.
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self::with_paths(InstallPaths::new(root))
    }

    /// Create an installer from resolved paths.
    pub fn with_paths(paths: InstallPaths) -> Self {
        Self {
            paths,
            options: MergeOptions::default(),
            cancel: CancellationToken::new(),
            progress: ProgressAccumulator::new(),
            on_event: None,
        }
    }

    /// Set merge options.
    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a cancellation token, checked before each package.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Receive every event of each run.
    pub fn with_event_callback(mut self, callback: InstallEventCallback) -> Self {
        self.on_event = Some(callback);
        self
    }

    pub fn paths(&self) -> &InstallPaths {
        &self.paths
    }

    /// Progress state of the current or last run.
    pub fn progress(&self) -> &ProgressAccumulator {
        &self.progress
    }

    /// Status text for the current phase.
    pub fn status(&self) -> String {
        self.progress.phase().to_string()
    }

    /// Run the structure check and merge every package.
    ///
    /// Controls are locked for the whole run and unlocked on every exit path.
    /// A fault emits exactly one `RunAborted` and resets progress to 0.
    pub fn run(&mut self, policy: &dyn LayoutPolicy) -> Result<RunOutcome, InstallError> {
        emit(&self.on_event, InstallEvent::ControlsChanged(ControlState::Locked));
        self.progress.start();

        let result = self.run_locked(policy);

        match &result {
            Ok(RunOutcome::Completed(report)) => {
                info!(
                    packages = report.packages,
                    models = report.models,
                    "Processing completed"
                );
            }
            Ok(RunOutcome::Aborted(reason)) => {
                warn!("Process aborted: {}", reason);
                self.progress.abort();
                emit(
                    &self.on_event,
                    InstallEvent::RunAborted {
                        reason: reason.to_string(),
                    },
                );
            }
            Err(e) => {
                warn!("Process aborted: {}", e);
                self.progress.abort();
                emit(
                    &self.on_event,
                    InstallEvent::RunAborted {
                        reason: e.to_string(),
                    },
                );
            }
        }

        emit(
            &self.on_event,
            InstallEvent::ControlsChanged(ControlState::Unlocked),
        );
        result
    }

    fn run_locked(&mut self, policy: &dyn LayoutPolicy) -> Result<RunOutcome, InstallError> {
        emit(&self.on_event, InstallEvent::StructureCheckStarted);

        let check = match validate(&self.paths, policy) {
            Ok(check) => check,
            Err(e) => {
                emit(
                    &self.on_event,
                    InstallEvent::StructureCheckFailed {
                        reason: e.to_string(),
                    },
                );
                return Err(e.into());
            }
        };

        if let LayoutCheck::Aborted(reason) = check {
            emit(
                &self.on_event,
                InstallEvent::StructureCheckFailed {
                    reason: reason.to_string(),
                },
            );
            return Ok(RunOutcome::Aborted(reason));
        }

        let value = self.progress.structure_checked();
        emit(
            &self.on_event,
            InstallEvent::StructureCheckPassed { progress: value },
        );

        let merger = PackageMerger::new(&self.paths, self.options.clone())
            .with_cancellation(self.cancel.clone());
        let on_event = &self.on_event;
        let report = merger.merge_all(&mut self.progress, &mut |event| match event {
            MergeEvent::PackageStarted {
                package,
                index,
                total,
            } => emit(
                on_event,
                InstallEvent::PackageStarted {
                    name: package.name.clone(),
                    index,
                    total,
                },
            ),
            MergeEvent::PackageCompleted {
                package, progress, ..
            } => emit(
                on_event,
                InstallEvent::PackageCompleted {
                    name: package.name.clone(),
                    progress,
                },
            ),
        })?;

        self.progress.finish();
        emit(
            &self.on_event,
            InstallEvent::RunCompleted {
                report: report.clone(),
            },
        );
        Ok(RunOutcome::Completed(report))
    }
}

fn emit(callback: &Option<InstallEventCallback>, event: InstallEvent) {
    if let Some(callback) = callback {
        callback(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FixedPolicy;
    use crate::merge::CollisionPolicy;
    use crate::progress::RunPhase;
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn recording_installer(root: &Path) -> (Installer, Arc<Mutex<Vec<InstallEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let installer = Installer::new(root)
            .with_event_callback(Box::new(move |e| sink.lock().unwrap().push(e.clone())));
        (installer, events)
    }

    #[test]
    fn test_empty_packages_dir_completes() {
        let temp = TempDir::new().unwrap();
        let (mut installer, events) = recording_installer(temp.path());

        let outcome = installer.run(&FixedPolicy::assume_yes()).unwrap();

        assert!(outcome.is_completed());
        assert_eq!(installer.progress().value(), 100);
        assert_eq!(installer.status(), "Done");

        let events = events.lock().unwrap();
        assert_eq!(
            events.first(),
            Some(&InstallEvent::ControlsChanged(ControlState::Locked))
        );
        assert_eq!(
            events.last(),
            Some(&InstallEvent::ControlsChanged(ControlState::Unlocked))
        );
        assert!(events.contains(&InstallEvent::StructureCheckPassed { progress: 10 }));
    }

    #[test]
    fn test_declined_creation_emits_single_abort() {
        let temp = TempDir::new().unwrap();
        let (mut installer, events) = recording_installer(temp.path());

        let err = installer.run(&FixedPolicy::decline_all()).unwrap_err();

        assert!(matches!(err, InstallError::Layout(_)));
        assert_eq!(installer.progress().phase(), RunPhase::Aborted);
        assert_eq!(installer.progress().value(), 0);

        let events = events.lock().unwrap();
        let aborts = events
            .iter()
            .filter(|e| matches!(e, InstallEvent::RunAborted { .. }))
            .count();
        assert_eq!(aborts, 1);
        assert!(matches!(
            events[events.len() - 2],
            InstallEvent::RunAborted { .. }
        ));
        assert!(!temp.path().join("Output").exists());
    }

    #[test]
    fn test_declined_overwrite_is_outcome_not_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Source/Extracted Packages")).unwrap();
        touch(&temp.path().join("Output/existing.txt"));
        let policy = FixedPolicy {
            create_missing: true,
            allow_overwrite: false,
        };
        let (mut installer, events) = recording_installer(temp.path());

        let outcome = installer.run(&policy).unwrap();

        assert!(matches!(outcome, RunOutcome::Aborted(_)));
        let events = events.lock().unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, InstallEvent::StructureCheckFailed { .. })));
        assert!(!events
            .iter()
            .any(|e| matches!(e, InstallEvent::PackageStarted { .. })));
    }

    #[test]
    fn test_package_events_in_order() {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("Source/Extracted Packages");
        touch(&packages.join("PkgB/aircraft/M2/model/m.mdl"));
        touch(&packages.join("PkgA/aircraft/M1/model/m.mdl"));
        let (mut installer, events) = recording_installer(temp.path());

        installer.run(&FixedPolicy::assume_yes()).unwrap();

        let events = events.lock().unwrap();
        let packages: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                InstallEvent::PackageCompleted { name, progress } => Some((name.clone(), *progress)),
                _ => None,
            })
            .collect();
        assert_eq!(
            packages,
            vec![("PkgA".to_string(), 50), ("PkgB".to_string(), 100)]
        );
        assert!(matches!(
            events[events.len() - 2],
            InstallEvent::RunCompleted { .. }
        ));
    }

    #[test]
    fn test_strict_collision_aborts() {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("Source/Extracted Packages");
        touch(&packages.join("PkgA/aircraft/Shared/model/a.mdl"));
        touch(&packages.join("PkgB/aircraft/Shared/model/b.mdl"));
        let (installer, events) = recording_installer(temp.path());
        let mut installer = installer
            .with_options(MergeOptions::default().with_collision_policy(CollisionPolicy::Strict));

        let err = installer.run(&FixedPolicy::assume_yes()).unwrap_err();

        assert!(matches!(err, InstallError::Merge(_)));
        assert_eq!(installer.progress().value(), 0);
        let events = events.lock().unwrap();
        assert_eq!(
            events.last(),
            Some(&InstallEvent::ControlsChanged(ControlState::Unlocked))
        );
    }

    #[test]
    fn test_cancelled_before_first_package() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("Source/Extracted Packages/PkgA/aircraft/M1/a.mdl"));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut installer = Installer::new(temp.path()).with_cancellation(cancel);

        let err = installer.run(&FixedPolicy::assume_yes()).unwrap_err();

        assert!(err.is_cancelled());
        assert!(!temp.path().join("Output/SimObjects").exists());
    }

    #[test]
    fn test_second_run_restarts_progress() {
        let temp = TempDir::new().unwrap();
        let mut installer = Installer::new(temp.path());

        installer.run(&FixedPolicy::assume_yes()).unwrap();
        // The packages directory exists now, so nothing is asked.
        installer.run(&FixedPolicy::assume_yes()).unwrap();

        assert_eq!(installer.progress().value(), 100);
    }
}
