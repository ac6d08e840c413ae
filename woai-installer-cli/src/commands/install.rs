//! Install command - merge every extracted package into `Output`.

use std::path::PathBuf;
use std::time::Instant;

use console::style;
use tokio_util::sync::CancellationToken;
use tracing::info;
use woai_installer::config::ConfigFile;
use woai_installer::install::{Installer, RunOutcome};
use woai_installer::layout::{FixedPolicy, LayoutPolicy};
use woai_installer::merge::{CollisionPolicy, MergeOptions, MergeReport};

use super::resolve_root;
use crate::error::CliError;
use crate::interaction::PromptPolicy;
use crate::ui::progress::{install_bar, print_done, render_event};

/// Arguments for the install command.
pub struct InstallArgs {
    pub root: Option<PathBuf>,
    pub yes: bool,
    pub strict: bool,
}

/// Run the install command.
pub fn run(args: InstallArgs, config: &ConfigFile) -> Result<(), CliError> {
    let root = resolve_root(args.root, config)?;
    let collisions = if args.strict {
        CollisionPolicy::Strict
    } else {
        config.merge.collisions
    };

    println!("WOAI Installer v{}", woai_installer::VERSION);
    println!("==================");
    println!();
    println!("Install root: {}", root.display());
    println!("Collisions:   {}", collisions);
    println!();

    let cancel = CancellationToken::new();
    let cancel_handler = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("Cancelling after the current package...");
        cancel_handler.cancel();
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let bar = install_bar();
    let bar_events = bar.clone();
    let mut installer = Installer::new(&root)
        .with_options(MergeOptions::default().with_collision_policy(collisions))
        .with_cancellation(cancel)
        .with_event_callback(Box::new(move |event| render_event(&bar_events, event)));

    let policy: Box<dyn LayoutPolicy> = if args.yes {
        Box::new(FixedPolicy::assume_yes())
    } else {
        Box::new(PromptPolicy::new(bar))
    };

    info!(root = %root.display(), "Starting install");
    let started = Instant::now();

    match installer.run(policy.as_ref())? {
        RunOutcome::Completed(report) => {
            println!();
            print_summary(&report);
            print_done(started.elapsed());
            Ok(())
        }
        RunOutcome::Aborted(reason) => {
            println!();
            Err(CliError::Aborted(reason.to_string()))
        }
    }
}

fn print_summary(report: &MergeReport) {
    println!("Packages:        {}", report.packages);
    println!("Models:          {}", report.models);
    println!("Shared textures: {}", report.shared_textures);
    println!("Scenery files:   {}", report.scenery_files);
    println!("texture.cfg:     {}", report.texture_configs);
    println!(
        "Copied:          {} files, {}",
        report.files_copied,
        indicatif::HumanBytes(report.bytes_copied)
    );

    if !report.collisions.is_empty() {
        println!();
        println!(
            "{}",
            style(format!(
                "{} entries were supplied by more than one package (last one kept):",
                report.collisions.len()
            ))
            .yellow()
        );
        for collision in &report.collisions {
            println!("  {}", collision);
        }
    }
    println!();
}
