//! Detection of destination entries written by more than one package.
//!
//! Packages are merged into shared destination directories, so two packages
//! shipping the same model name or the same scenery file overwrite each other.
//! The default policy keeps last-package-wins and records the collision; the
//! strict policy refuses to write the second copy.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use super::error::{MergeError, MergeResult};

/// What kind of destination entry collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    /// A model directory under `SimObjects/Airplanes`.
    Model,
    /// A file under `WOAI Traffic/scenery`.
    SceneryFile,
    /// A file under `WOAI_Base/Texture_Fallback`.
    SharedTexture,
}

impl CollisionKind {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::SceneryFile => "scenery file",
            Self::SharedTexture => "shared texture",
        }
    }
}

/// A destination entry supplied by two packages in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub kind: CollisionKind,
    /// Model directory name or file name.
    pub name: String,
    /// Package that wrote the entry first.
    pub first_package: String,
    /// Package that wrote (or tried to write) it again.
    pub package: String,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' from package '{}' collides with package '{}'",
            self.kind.name(),
            self.name,
            self.package,
            self.first_package
        )
    }
}

/// How to treat collisions between packages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Last package wins; collisions are logged and reported.
    #[default]
    Overwrite,
    /// The first collision aborts the run before anything is overwritten.
    ///
    /// Names are compared ignoring case, as Prepar3D's file system does.
    Strict,
}

impl CollisionPolicy {
    /// Config file representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown collision policy '{}' (expected 'overwrite' or 'strict')",
                other
            )),
        }
    }
}

/// Tracks which package first wrote each destination entry during a run.
#[derive(Debug)]
pub struct CollisionTracker {
    policy: CollisionPolicy,
    owners: HashMap<(CollisionKind, String), String>,
    collisions: Vec<Collision>,
}

impl CollisionTracker {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            owners: HashMap::new(),
            collisions: Vec::new(),
        }
    }

    /// Record that `package` is about to write `name`.
    ///
    /// Fails only under [`CollisionPolicy::Strict`]. Writing the same entry
    /// twice from the same package is not a collision. `WOAI_B738` and
    /// `woai_b738` name the same entry on Windows and are tracked as one.
    pub fn claim(&mut self, kind: CollisionKind, name: &str, package: &str) -> MergeResult<()> {
        let key = (kind, name.to_lowercase());
        let Some(owner) = self.owners.get(&key).cloned() else {
            self.owners.insert(key, package.to_string());
            return Ok(());
        };
        if owner == package {
            return Ok(());
        }

        let collision = Collision {
            kind,
            name: name.to_string(),
            first_package: owner.clone(),
            package: package.to_string(),
        };

        match self.policy {
            CollisionPolicy::Strict => Err(MergeError::Collision(collision)),
            CollisionPolicy::Overwrite => {
                warn!(
                    kind = kind.name(),
                    entry = name,
                    package,
                    first_package = %owner,
                    "Overwriting entry supplied by an earlier package"
                );
                self.owners.insert(key, package.to_string());
                self.collisions.push(collision);
                Ok(())
            }
        }
    }

    /// Collisions recorded so far.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Consume the tracker, returning the recorded collisions.
    pub fn into_collisions(self) -> Vec<Collision> {
        self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "overwrite".parse::<CollisionPolicy>().unwrap(),
            CollisionPolicy::Overwrite
        );
        assert_eq!(
            " STRICT ".parse::<CollisionPolicy>().unwrap(),
            CollisionPolicy::Strict
        );
        assert!("merge".parse::<CollisionPolicy>().is_err());
        assert_eq!(CollisionPolicy::default(), CollisionPolicy::Overwrite);
    }

    #[test]
    fn test_overwrite_records_collision() {
        let mut tracker = CollisionTracker::new(CollisionPolicy::Overwrite);
        tracker.claim(CollisionKind::Model, "WOAI_B738", "PkgA").unwrap();
        tracker.claim(CollisionKind::Model, "WOAI_B738", "PkgB").unwrap();

        assert_eq!(tracker.collisions().len(), 1);
        let collision = &tracker.collisions()[0];
        assert_eq!(collision.first_package, "PkgA");
        assert_eq!(collision.package, "PkgB");
    }

    #[test]
    fn test_same_package_is_not_a_collision() {
        let mut tracker = CollisionTracker::new(CollisionPolicy::Strict);
        tracker.claim(CollisionKind::SceneryFile, "a.bgl", "PkgA").unwrap();
        tracker.claim(CollisionKind::SceneryFile, "a.bgl", "PkgA").unwrap();
        assert!(tracker.collisions().is_empty());
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut tracker = CollisionTracker::new(CollisionPolicy::Strict);
        tracker.claim(CollisionKind::SceneryFile, "x", "PkgA").unwrap();
        tracker.claim(CollisionKind::SharedTexture, "x", "PkgB").unwrap();
        assert!(tracker.into_collisions().is_empty());
    }

    #[test]
    fn test_names_differing_in_case_collide() {
        let mut tracker = CollisionTracker::new(CollisionPolicy::Strict);
        tracker.claim(CollisionKind::Model, "WOAI_B738", "PkgA").unwrap();

        let err = tracker
            .claim(CollisionKind::Model, "woai_b738", "PkgB")
            .unwrap_err();

        match err {
            MergeError::Collision(collision) => {
                assert_eq!(collision.name, "woai_b738");
                assert_eq!(collision.first_package, "PkgA");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_strict_rejects_collision() {
        let mut tracker = CollisionTracker::new(CollisionPolicy::Strict);
        tracker.claim(CollisionKind::SharedTexture, "t.bmp", "PkgA").unwrap();

        let err = tracker
            .claim(CollisionKind::SharedTexture, "t.bmp", "PkgB")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "shared texture 't.bmp' from package 'PkgB' collides with package 'PkgA'"
        );
    }
}
