//! Stage-by-stage progress display for loading and compositing

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for one collage run
///
/// Each stage (loading images, compositing tiles) gets its own bar; a bar is
/// left finished on screen when the next stage starts.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    stage_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>12}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{wide_msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            stage_bar: None,
        }
    }

    /// Begin a stage of `total` steps, finishing the previous one
    pub fn start_stage(&mut self, label: &str, total: usize) {
        self.finish_stage();
        let bar = ProgressBar::new(total as u64);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(label.to_string());
        self.stage_bar = Some(self.multi_progress.add(bar));
    }

    /// Show what the current stage is working on
    pub fn set_message(&self, message: &str) {
        if let Some(ref bar) = self.stage_bar {
            bar.set_message(message.to_string());
        }
    }

    /// Advance the current stage by one step
    pub fn advance(&self) {
        if let Some(ref bar) = self.stage_bar {
            bar.inc(1);
        }
    }

    /// Steps completed in the current stage
    pub fn position(&self) -> Option<u64> {
        self.stage_bar.as_ref().map(ProgressBar::position)
    }

    /// Mark the current stage as done
    pub fn finish_stage(&mut self) {
        if let Some(bar) = self.stage_bar.take() {
            bar.finish_with_message("done");
        }
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        self.finish_stage();
        let _ = self.multi_progress.clear();
    }
}
