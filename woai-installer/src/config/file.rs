//! INI configuration file.
//!
//! ```ini
//! [install]
//! root = /path/to/woai
//!
//! [merge]
//! collisions = overwrite
//!
//! [logging]
//! level = info
//! directory = /path/to/logs
//! ```
//!
//! Missing sections and keys fall back to defaults. Unparseable values are
//! logged and ignored so a hand-edited file never blocks a run.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::warn;

use super::error::{ConfigError, ConfigResult};
use crate::merge::CollisionPolicy;

const APP_DIR: &str = "woai-installer";
const CONFIG_FILE_NAME: &str = "config.ini";

pub(crate) const SECTION_INSTALL: &str = "install";
pub(crate) const SECTION_MERGE: &str = "merge";
pub(crate) const SECTION_LOGGING: &str = "logging";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Location of the user's config file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE_NAME)
}

/// Default directory for log files.
pub fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

/// `[install]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSettings {
    /// Install root used when a command is given none.
    pub root: Option<PathBuf>,
}

/// `[merge]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSettings {
    pub collisions: CollisionPolicy,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: default_log_directory(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub install: InstallSettings,
    pub merge: MergeSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from [`config_file_path`]. A missing file yields defaults.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_ini(&ini))
    }

    /// Save to [`config_file_path`].
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save to an explicit path, creating its parent directory.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        self.to_ini()
            .write_to_file(path)
            .map_err(|e| ConfigError::WriteFailed {
                path: path.to_path_buf(),
                source: e,
            })
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some(SECTION_INSTALL)) {
            config.install.root = section
                .get("root")
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
        }

        if let Some(section) = ini.section(Some(SECTION_MERGE)) {
            if let Some(value) = section.get("collisions") {
                match value.parse() {
                    Ok(policy) => config.merge.collisions = policy,
                    Err(e) => warn!("Ignoring merge.collisions: {}", e),
                }
            }
        }

        if let Some(section) = ini.section(Some(SECTION_LOGGING)) {
            if let Some(level) = section.get("level") {
                let level = level.trim().to_lowercase();
                if LOG_LEVELS.contains(&level.as_str()) {
                    config.logging.level = level;
                } else {
                    warn!("Ignoring unknown logging.level '{}'", level);
                }
            }
            if let Some(dir) = section.get("directory").map(str::trim) {
                if !dir.is_empty() {
                    config.logging.directory = PathBuf::from(dir);
                }
            }
        }

        config
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        let root = self
            .install
            .root
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        ini.with_section(Some(SECTION_INSTALL)).set("root", root);

        ini.with_section(Some(SECTION_MERGE))
            .set("collisions", self.merge.collisions.as_str());

        ini.with_section(Some(SECTION_LOGGING))
            .set("level", self.logging.level.as_str())
            .set("directory", self.logging.directory.to_string_lossy());

        ini
    }
}
