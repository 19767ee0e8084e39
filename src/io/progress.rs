//! Batch progress reporting for CLI file processing

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for batch generation
///
/// Shows a spinner per file, plus an overall batch bar when the file count
/// is large enough that per-file output would spam the terminal.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    current: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            current: None,
        }
    }

    /// Initialize the display for a batch of the given size
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Begin displaying progress for one file
    pub fn start_file(&mut self, path: &Path) {
        let display_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| {
                name.to_string_lossy().into_owned()
            });

        let bar = ProgressBar::new_spinner();
        bar.set_style(FILE_STYLE.clone());
        bar.set_message(format!("Generating {display_name}"));
        bar.enable_steady_tick(Duration::from_millis(100));
        self.current = Some(self.multi_progress.add(bar));
    }

    /// Finish the current file with a summary line
    pub fn finish_file(&mut self, summary: String) {
        if let Some(bar) = self.current.take() {
            bar.finish_with_message(summary);
        }
        if let Some(ref batch) = self.batch_bar {
            batch.inc(1);
        }
    }

    /// Finish the batch display
    pub fn finish(&mut self) {
        if let Some(bar) = self.batch_bar.take() {
            bar.finish();
        }
    }
}
