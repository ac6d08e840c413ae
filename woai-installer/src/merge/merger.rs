//! Multi-package merge.
//!
//! For each package, in name order:
//! 1. Copy shared textures to `WOAI_Base/Texture_Fallback`
//! 2. Copy each model to `SimObjects/Airplanes/<model>` and, when the package
//!    shipped shared textures, write `texture.cfg` into its texture variants
//! 3. Copy scenery files to `WOAI Traffic/scenery`
//! 4. Advance progress
//!
//! Textures go first because the `texture.cfg` files written in step 2 point
//! at the fallback directory. Any error aborts the whole run; already copied
//! files stay in place.

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::collision::{Collision, CollisionKind, CollisionPolicy, CollisionTracker};
use super::copier::{copy_flat, copy_tree, create_dir, CopyStats};
use super::error::{MergeError, MergeResult};
use super::fallback::write_fallback_configs;
use super::package::{discover_packages, Package};
use crate::paths::InstallPaths;
use crate::progress::ProgressAccumulator;

/// Options controlling a merge run.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// How to treat entries supplied by more than one package.
    pub collisions: CollisionPolicy,
}

impl MergeOptions {
    /// Set the collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collisions = policy;
        self
    }
}

/// What one package contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub name: String,
    pub models: usize,
    pub shared_textures: usize,
    pub scenery_files: usize,
    pub texture_configs: usize,
    pub files_copied: usize,
    pub bytes_copied: u64,
}

/// Totals for a completed merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub packages: usize,
    pub models: usize,
    pub shared_textures: usize,
    pub scenery_files: usize,
    pub texture_configs: usize,
    pub files_copied: usize,
    pub bytes_copied: u64,
    /// Entries overwritten by a later package (overwrite policy only).
    pub collisions: Vec<Collision>,
}

impl MergeReport {
    fn record(&mut self, summary: &PackageSummary) {
        self.packages += 1;
        self.models += summary.models;
        self.shared_textures += summary.shared_textures;
        self.scenery_files += summary.scenery_files;
        self.texture_configs += summary.texture_configs;
        self.files_copied += summary.files_copied;
        self.bytes_copied += summary.bytes_copied;
    }
}

/// Per-package notifications emitted while merging.
#[derive(Debug)]
pub enum MergeEvent<'a> {
    /// A package is about to be merged. `index` is zero-based.
    PackageStarted {
        package: &'a Package,
        index: usize,
        total: usize,
    },
    /// A package was merged; `progress` is the run-wide value after it.
    PackageCompleted {
        package: &'a Package,
        summary: &'a PackageSummary,
        progress: u8,
    },
}

/// Merges every extracted package of one install root into its output tree.
pub struct PackageMerger<'a> {
    paths: &'a InstallPaths,
    options: MergeOptions,
    cancel: CancellationToken,
}

impl<'a> PackageMerger<'a> {
    /// Create a merger for the given install root.
    pub fn new(paths: &'a InstallPaths, options: MergeOptions) -> Self {
        Self {
            paths,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Use a cancellation token, checked before each package.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Merge all packages.
    ///
    /// `progress` must already be running; it receives one step per package.
    pub fn merge_all(
        &self,
        progress: &mut ProgressAccumulator,
        on_event: &mut dyn FnMut(MergeEvent<'_>),
    ) -> MergeResult<MergeReport> {
        let packages = discover_packages(&self.paths.extracted_packages_root())?;
        let total = packages.len();
        info!("About to process {} packages.", total);

        progress.begin_packages(total);
        let mut tracker = CollisionTracker::new(self.options.collisions);
        let mut report = MergeReport::default();

        for (index, package) in packages.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(MergeError::Cancelled {
                    completed: index,
                    total,
                });
            }

            on_event(MergeEvent::PackageStarted {
                package,
                index,
                total,
            });

            let summary = self.merge_package(package, &mut tracker)?;
            report.record(&summary);

            let value = progress.package_completed();
            on_event(MergeEvent::PackageCompleted {
                package,
                summary: &summary,
                progress: value,
            });
        }

        report.collisions = tracker.into_collisions();
        info!("Processing complete.");
        Ok(report)
    }

    /// Merge a single package.
    fn merge_package(
        &self,
        package: &Package,
        tracker: &mut CollisionTracker,
    ) -> MergeResult<PackageSummary> {
        info!("Processing package: {}", package.name);
        let mut summary = PackageSummary {
            name: package.name.clone(),
            ..Default::default()
        };
        let mut stats = CopyStats::default();

        let needs_fallback = self.copy_shared_textures(package, tracker, &mut summary, &mut stats)?;

        for model in package.models()? {
            tracker.claim(CollisionKind::Model, &model.name, &package.name)?;

            let dest = self.paths.airplanes_root().join(model.dir_name());
            info!(
                "Copying model: {} --> {}",
                model.path.display(),
                dest.display()
            );
            stats.add(copy_tree(&model.path, &dest)?);
            summary.models += 1;

            if needs_fallback {
                summary.texture_configs += write_fallback_configs(&dest)?.len();
            }
        }

        self.copy_scenery(package, tracker, &mut summary, &mut stats)?;

        summary.files_copied = stats.files;
        summary.bytes_copied = stats.bytes;
        Ok(summary)
    }

    /// Copy `<package>/Texture/*` into the fallback directory.
    ///
    /// Returns whether the package supplied any shared textures.
    fn copy_shared_textures(
        &self,
        package: &Package,
        tracker: &mut CollisionTracker,
        summary: &mut PackageSummary,
        stats: &mut CopyStats,
    ) -> MergeResult<bool> {
        let textures = package.shared_textures()?;
        if textures.is_empty() {
            return Ok(false);
        }

        for name in &textures {
            tracker.claim(
                CollisionKind::SharedTexture,
                &name.to_string_lossy(),
                &package.name,
            )?;
        }

        let dest = self.paths.texture_fallback_root();
        create_dir(&dest)?;
        info!(
            "Copying {} texture files: {} --> {}",
            textures.len(),
            package.texture_dir().display(),
            dest.display()
        );
        let (copied, copy_stats) = copy_flat(&package.texture_dir(), &dest)?;
        summary.shared_textures = copied.len();
        stats.add(copy_stats);
        Ok(true)
    }

    /// Copy `<package>/scenery/world/scenery/*` into the scenery output.
    fn copy_scenery(
        &self,
        package: &Package,
        tracker: &mut CollisionTracker,
        summary: &mut PackageSummary,
        stats: &mut CopyStats,
    ) -> MergeResult<()> {
        let dest = self.paths.scenery_output_root();
        create_dir(&dest)?;

        let files = package.scenery_files()?;
        if files.is_empty() {
            return Ok(());
        }

        for name in &files {
            tracker.claim(
                CollisionKind::SceneryFile,
                &name.to_string_lossy(),
                &package.name,
            )?;
        }

        info!(
            "Copying {} scenery files: {} --> {}",
            files.len(),
            package.scenery_dir().display(),
            dest.display()
        );
        let (copied, copy_stats) = copy_flat(&package.scenery_dir(), &dest)?;
        summary.scenery_files = copied.len();
        stats.add(copy_stats);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    use crate::merge::fallback::{texture_cfg_contents, TEXTURE_CFG_NAME};

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn running_progress() -> ProgressAccumulator {
        let mut progress = ProgressAccumulator::new();
        progress.start();
        progress
    }

    fn merge(paths: &InstallPaths, options: MergeOptions) -> MergeResult<MergeReport> {
        let mut progress = running_progress();
        PackageMerger::new(paths, options).merge_all(&mut progress, &mut |_| {})
    }

    #[test]
    fn test_merge_single_package() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::new(temp.path());
        let pkg = paths.extracted_packages_root().join("PkgA");
        write(&pkg.join("aircraft/M1/aircraft.cfg"), "m1");
        fs::create_dir_all(pkg.join("aircraft/M1/texture.day")).unwrap();
        write(&pkg.join("Texture/t.bmp"), "shared");
        write(&pkg.join("scenery/world/scenery/s.bgl"), "bgl");

        let report = merge(&paths, MergeOptions::default()).unwrap();

        assert_eq!(report.packages, 1);
        assert_eq!(report.models, 1);
        assert_eq!(report.texture_configs, 1);
        assert_eq!(report.shared_textures, 1);
        assert_eq!(report.scenery_files, 1);
        assert_eq!(report.files_copied, 3);
        assert!(paths.texture_fallback_root().join("t.bmp").exists());
        assert!(paths.scenery_output_root().join("s.bgl").exists());
        assert_eq!(
            fs::read_to_string(
                paths
                    .model_output_dir("M1")
                    .join("texture.day")
                    .join(TEXTURE_CFG_NAME)
            )
            .unwrap(),
            texture_cfg_contents()
        );
    }

    #[test]
    fn test_no_shared_textures_no_cfg() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::new(temp.path());
        let pkg = paths.extracted_packages_root().join("PkgA");
        write(&pkg.join("aircraft/M1/texture.day/t.bmp"), "own");
        fs::create_dir_all(pkg.join("Texture")).unwrap();

        let report = merge(&paths, MergeOptions::default()).unwrap();

        assert_eq!(report.texture_configs, 0);
        assert!(!paths
            .model_output_dir("M1")
            .join("texture.day")
            .join(TEXTURE_CFG_NAME)
            .exists());
        assert!(!paths.texture_fallback_root().exists());
    }

    #[test]
    fn test_fallback_only_for_owning_package() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::new(temp.path());
        let root = paths.extracted_packages_root();
        write(&root.join("PkgA/Texture/t.bmp"), "shared");
        fs::create_dir_all(root.join("PkgA/aircraft/MA/texture.a")).unwrap();
        fs::create_dir_all(root.join("PkgB/aircraft/MB/texture.b")).unwrap();

        merge(&paths, MergeOptions::default()).unwrap();

        assert!(paths
            .model_output_dir("MA")
            .join("texture.a/texture.cfg")
            .exists());
        assert!(!paths
            .model_output_dir("MB")
            .join("texture.b/texture.cfg")
            .exists());
    }

    #[test]
    fn test_scenery_output_created_even_without_scenery() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::new(temp.path());
        fs::create_dir_all(paths.extracted_packages_root().join("Empty")).unwrap();

        let report = merge(&paths, MergeOptions::default()).unwrap();

        assert_eq!(report.packages, 1);
        assert!(paths.scenery_output_root().is_dir());
    }

    #[test]
    fn test_last_package_wins_and_reports_collision() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::new(temp.path());
        let root = paths.extracted_packages_root();
        write(&root.join("PkgA/aircraft/M1/aircraft.cfg"), "from a");
        write(&root.join("PkgB/aircraft/M1/aircraft.cfg"), "from b");

        let report = merge(&paths, MergeOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(paths.model_output_dir("M1").join("aircraft.cfg")).unwrap(),
            "from b"
        );
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].kind, CollisionKind::Model);
    }

    #[test]
    fn test_strict_mode_stops_before_overwrite() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::new(temp.path());
        let root = paths.extracted_packages_root();
        write(&root.join("PkgA/scenery/world/scenery/s.bgl"), "from a");
        write(&root.join("PkgB/scenery/world/scenery/s.bgl"), "from b");

        let err = merge(
            &paths,
            MergeOptions::default().with_collision_policy(CollisionPolicy::Strict),
        )
        .unwrap_err();

        assert!(matches!(err, MergeError::Collision(_)));
        assert_eq!(
            fs::read_to_string(paths.scenery_output_root().join("s.bgl")).unwrap(),
            "from a"
        );
    }

    #[test]
    fn test_events_and_progress() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::new(temp.path());
        for name in ["D", "B", "A", "C"] {
            fs::create_dir_all(paths.extracted_packages_root().join(name)).unwrap();
        }

        let mut progress = running_progress();
        let mut seen = Vec::new();
        PackageMerger::new(&paths, MergeOptions::default())
            .merge_all(&mut progress, &mut |event| {
                if let MergeEvent::PackageCompleted {
                    package, progress, ..
                } = event
                {
                    seen.push((package.name.clone(), progress));
                }
            })
            .unwrap();

        assert_eq!(
            seen,
            vec![
                ("A".to_string(), 25),
                ("B".to_string(), 50),
                ("C".to_string(), 75),
                ("D".to_string(), 100),
            ]
        );
    }

    #[test]
    fn test_cancelled_before_first_package() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::new(temp.path());
        write(
            &paths
                .extracted_packages_root()
                .join("PkgA/aircraft/M1/aircraft.cfg"),
            "m1",
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut progress = running_progress();
        let err = PackageMerger::new(&paths, MergeOptions::default())
            .with_cancellation(cancel)
            .merge_all(&mut progress, &mut |_| {})
            .unwrap_err();

        assert!(matches!(
            err,
            MergeError::Cancelled {
                completed: 0,
                total: 1
            }
        ));
        assert!(!paths.model_output_dir("M1").exists());
    }

    #[test]
    fn test_missing_packages_root_yields_empty_report() {
        let temp = TempDir::new().unwrap();
        let paths = InstallPaths::new(temp.path());

        let report = merge(&paths, MergeOptions::default()).unwrap();

        // An absent root is indistinguishable from an empty one here; the
        // layout check is responsible for rejecting it earlier.
        assert_eq!(report.packages, 0);
    }
}
