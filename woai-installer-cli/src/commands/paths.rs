//! Paths command - show the folder layout derived from an install root.

use std::path::{Path, PathBuf};

use console::style;
use woai_installer::config::ConfigFile;
use woai_installer::layout::inspect;
use woai_installer::paths::InstallPaths;

use super::resolve_root;
use crate::error::CliError;

/// Run the paths command.
pub fn run(root: Option<PathBuf>, config: &ConfigFile) -> Result<(), CliError> {
    let paths = InstallPaths::new(resolve_root(root, config)?);
    let report = inspect(&paths)?;

    print_path("Install root", paths.root());
    print_path("Packages", &paths.extracted_packages_root());
    print_path("Output", &paths.output_root());
    print_path("Airplanes", &paths.airplanes_root());
    print_path("Texture fallback", &paths.texture_fallback_root());
    print_path("Scenery", &paths.scenery_output_root());

    println!();
    if !report.root_exists {
        println!("{}", style("Install root does not exist").red());
    } else if report.needs_create() {
        println!(
            "{}",
            style("Packages folder is missing and will be created on install").yellow()
        );
    }
    if report.overwrite_risk() {
        println!(
            "{}",
            style(format!(
                "Output already holds {} entries; install will ask before overwriting",
                report.output_entries
            ))
            .yellow()
        );
    }
    Ok(())
}

fn print_path(label: &str, path: &Path) {
    let state = if path.exists() {
        style("exists").green()
    } else {
        style("missing").dim()
    };
    println!("{:<17} {} ({})", format!("{}:", label), path.display(), state);
}
