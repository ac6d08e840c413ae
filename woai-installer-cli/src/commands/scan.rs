//! Scan command - list extracted packages without copying anything.

use std::path::PathBuf;

use console::style;
use woai_installer::config::ConfigFile;
use woai_installer::merge::scan_packages;
use woai_installer::paths::InstallPaths;

use super::resolve_root;
use crate::error::CliError;

/// Run the scan command.
pub fn run(root: Option<PathBuf>, json: bool, config: &ConfigFile) -> Result<(), CliError> {
    let paths = InstallPaths::new(resolve_root(root, config)?);
    let packages_root = paths.extracted_packages_root();
    let inventory = scan_packages(&packages_root)?;

    if json {
        let text = serde_json::to_string_pretty(&inventory)
            .map_err(|e| CliError::Config(format!("Failed to encode scan result: {}", e)))?;
        println!("{}", text);
        return Ok(());
    }

    if !packages_root.is_dir() {
        println!("Packages folder not found: {}", packages_root.display());
        return Ok(());
    }

    println!("Packages in {}", packages_root.display());
    println!();

    if inventory.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    for package in &inventory {
        let marker = if package.is_empty() {
            style("(empty)").dim().to_string()
        } else if package.needs_fallback() {
            style("fallback").cyan().to_string()
        } else {
            String::new()
        };
        println!("{} {}", style(&package.name).bold(), marker);
        println!(
            "    {} models, {} scenery files, {} shared textures",
            package.models.len(),
            package.scenery_files,
            package.shared_textures
        );
        for model in &package.models {
            println!("      {}", model);
        }
    }

    let models: usize = inventory.iter().map(|p| p.models.len()).sum();
    println!();
    println!("{} packages, {} models", inventory.len(), models);
    Ok(())
}
