//! Addressable configuration keys (`section.key`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::{ConfigError, ConfigResult};
use super::file::{
    default_log_directory, ConfigFile, LOG_LEVELS, SECTION_INSTALL, SECTION_LOGGING,
    SECTION_MERGE,
};
use crate::merge::CollisionPolicy;

/// A single configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    InstallRoot,
    MergeCollisions,
    LoggingLevel,
    LoggingDirectory,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            Self::InstallRoot,
            Self::MergeCollisions,
            Self::LoggingLevel,
            Self::LoggingDirectory,
        ]
    }

    /// Full name, e.g. `install.root`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InstallRoot => "install.root",
            Self::MergeCollisions => "merge.collisions",
            Self::LoggingLevel => "logging.level",
            Self::LoggingDirectory => "logging.directory",
        }
    }

    pub fn section(&self) -> &'static str {
        match self {
            Self::InstallRoot => SECTION_INSTALL,
            Self::MergeCollisions => SECTION_MERGE,
            Self::LoggingLevel | Self::LoggingDirectory => SECTION_LOGGING,
        }
    }

    /// Name within the section, e.g. `root`.
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::InstallRoot => "root",
            Self::MergeCollisions => "collisions",
            Self::LoggingLevel => "level",
            Self::LoggingDirectory => "directory",
        }
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            Self::InstallRoot => config
                .install
                .root
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            Self::MergeCollisions => config.merge.collisions.to_string(),
            Self::LoggingLevel => config.logging.level.clone(),
            Self::LoggingDirectory => config.logging.directory.display().to_string(),
        }
    }

    /// Validate and store a value. An empty value restores the default.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> ConfigResult<()> {
        let value = value.trim();
        match self {
            Self::InstallRoot => {
                config.install.root = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            Self::MergeCollisions => {
                config.merge.collisions = if value.is_empty() {
                    CollisionPolicy::default()
                } else {
                    value
                        .parse::<CollisionPolicy>()
                        .map_err(|reason| self.invalid(value, reason))?
                };
            }
            Self::LoggingLevel => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(
                        value,
                        format!("expected one of {}", LOG_LEVELS.join(", ")),
                    ));
                }
                config.logging.level = level;
            }
            Self::LoggingDirectory => {
                config.logging.directory = if value.is_empty() {
                    default_log_directory()
                } else {
                    PathBuf::from(value)
                };
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: String) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name().to_string(),
            value: value.to_string(),
            reason,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
