//! Interactive answers to folder structure questions.

use std::path::Path;

use dialoguer::Confirm;
use indicatif::ProgressBar;
use woai_installer::layout::LayoutPolicy;

/// Asks the user on the terminal.
///
/// Prompts are shown with the progress bar suspended. A prompt that cannot
/// be shown (no terminal) counts as "no".
pub struct PromptPolicy {
    bar: ProgressBar,
}

impl PromptPolicy {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }

    fn confirm(&self, prompt: String) -> bool {
        self.bar.suspend(|| {
            Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .unwrap_or(false)
        })
    }
}

impl LayoutPolicy for PromptPolicy {
    fn confirm_create(&self, path: &Path) -> bool {
        self.confirm(format!(
            "The packages folder {} does not exist. Create it?",
            path.display()
        ))
    }

    fn confirm_overwrite(&self, output_root: &Path, entries: usize) -> bool {
        self.confirm(format!(
            "The output folder {} already contains {} entries. Files may be overwritten. Continue?",
            output_root.display(),
            entries
        ))
    }
}
