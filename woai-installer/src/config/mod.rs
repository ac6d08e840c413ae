//! User configuration.
//!
//! Settings live in an INI file under the platform config directory. Command
//! line flags take precedence over the file, which takes precedence over
//! built-in defaults.

mod error;
mod file;
mod keys;

pub use error::{ConfigError, ConfigResult};
pub use file::{
    config_file_path, default_log_directory, ConfigFile, InstallSettings, LoggingSettings,
    MergeSettings, DEFAULT_LOG_LEVEL, LOG_LEVELS,
};
pub use keys::ConfigKey;
