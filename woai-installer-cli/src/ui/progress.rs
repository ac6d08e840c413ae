//! Terminal progress display for install runs.

use std::time::Duration;

use console::{style, Emoji};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use woai_installer::install::InstallEvent;
use woai_installer::progress::PROGRESS_MAX;

pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
pub static PLANE: Emoji<'_, '_> = Emoji("✈️  ", "");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
pub static CHECK: Emoji<'_, '_> = Emoji("✔ ", "+ ");
pub static CROSS: Emoji<'_, '_> = Emoji("✘ ", "x ");

/// Bar style: `[2/4] [=====>    ]  50% WOAI_Delta`
pub fn install_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:.bold.dim} [{bar:40.cyan/blue}] {pos:>3}% {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// A 0-100 bar for one run.
pub fn install_bar() -> ProgressBar {
    let bar = ProgressBar::new(u64::from(PROGRESS_MAX));
    bar.set_style(install_style());
    bar
}

/// Reflect one run event on the bar.
pub fn render_event(bar: &ProgressBar, event: &InstallEvent) {
    if let Some(value) = event.progress() {
        bar.set_position(u64::from(value));
    }

    match event {
        InstallEvent::ControlsChanged(_) => {}
        InstallEvent::StructureCheckStarted => {
            bar.set_message(format!("{}Checking folder structure", LOOKING_GLASS));
        }
        InstallEvent::StructureCheckPassed { .. } => {
            bar.println(format!("{}Folder structure OK", style(CHECK).green()));
        }
        InstallEvent::StructureCheckFailed { reason } => {
            bar.println(format!("{}{}", style(CROSS).red(), style(reason).red()));
        }
        InstallEvent::PackageStarted { name, index, total } => {
            bar.set_prefix(format!("[{}/{}]", index + 1, total));
            bar.set_message(format!("{}{}", PLANE, name));
        }
        InstallEvent::PackageCompleted { name, .. } => {
            bar.println(format!("  {}{}", style(CHECK).green(), name));
        }
        InstallEvent::RunCompleted { .. } => {
            bar.finish_with_message("Processing completed");
        }
        InstallEvent::RunAborted { .. } => {
            bar.abandon_with_message(style("Aborted").red().to_string());
        }
    }
}

/// Print `✨ Done in 2s`.
pub fn print_done(elapsed: Duration) {
    println!("{}Done in {}", SPARKLE, HumanDuration(elapsed));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_follows_event_progress() {
        let bar = ProgressBar::hidden();
        bar.set_length(100);

        render_event(&bar, &InstallEvent::StructureCheckPassed { progress: 10 });
        assert_eq!(bar.position(), 10);

        render_event(
            &bar,
            &InstallEvent::PackageCompleted {
                name: "PkgA".to_string(),
                progress: 50,
            },
        );
        assert_eq!(bar.position(), 50);

        render_event(
            &bar,
            &InstallEvent::RunAborted {
                reason: "declined".to_string(),
            },
        );
        assert_eq!(bar.position(), 0);
        assert!(bar.is_finished());
    }

    #[test]
    fn test_package_started_sets_prefix() {
        let bar = ProgressBar::hidden();
        render_event(
            &bar,
            &InstallEvent::PackageStarted {
                name: "PkgB".to_string(),
                index: 1,
                total: 4,
            },
        );
        assert_eq!(bar.prefix(), "[2/4]");
        assert!(bar.message().ends_with("PkgB"));
    }
}
