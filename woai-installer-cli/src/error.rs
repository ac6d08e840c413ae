//! CLI error type.

use thiserror::Error;
use woai_installer::config::ConfigError;
use woai_installer::install::InstallError;
use woai_installer::layout::LayoutError;
use woai_installer::merge::MergeError;

/// Errors surfaced to the user by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error("Install failed: {0}")]
    Install(#[from] InstallError),

    #[error("Folder structure check failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Package scan failed: {0}")]
    Scan(#[from] MergeError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Process aborted: {0}")]
    Aborted(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Install(e) if e.is_cancelled() => 130,
            _ => 1,
        }
    }
}
