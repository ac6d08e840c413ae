//! CLI subcommands.

pub mod config;
pub mod install;
pub mod paths;
pub mod scan;

use std::path::PathBuf;

use woai_installer::config::ConfigFile;

use crate::error::CliError;

/// Pick the install root: argument, then `install.root`, then the working directory.
pub fn resolve_root(cli_root: Option<PathBuf>, config: &ConfigFile) -> Result<PathBuf, CliError> {
    if let Some(root) = cli_root.or_else(|| config.install.root.clone()) {
        return Ok(root);
    }
    std::env::current_dir().map_err(|e| {
        CliError::Config(format!(
            "No install root given and the working directory is unavailable: {}. \
             Pass a root or set install.root.",
            e
        ))
    })
}
