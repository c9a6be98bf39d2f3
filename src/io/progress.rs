//! Round-level progress reporting for single files and batches

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static ROUND_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Frames: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display: one bar for the active file's rounds, plus
/// a batch bar when processing more than one file
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    round_bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with an inactive round bar
    pub fn new() -> Self {
        let multi_progress = MultiProgress::new();
        let round_bar = multi_progress.add(ProgressBar::new(0));
        round_bar.set_style(ROUND_STYLE.clone());
        Self {
            multi_progress,
            batch_bar: None,
            round_bar,
        }
    }

    /// Add a batch bar when more than one file will be processed
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.insert(0, batch_bar));
        }
    }

    /// Point the round bar at a new file
    pub fn start_file(&self, path: &Path, rounds: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.round_bar.set_length(rounds as u64);
        self.round_bar.set_position(0);
        self.round_bar.set_prefix(name);
        self.update_round(0, rounds);
    }

    /// Report the current round
    pub fn update_round(&self, round: usize, rounds: usize) {
        self.round_bar.set_position(round as u64);
        let width = rounds.to_string().len();
        self.round_bar.set_message(format!("{round:>width$}/{rounds}"));
    }

    /// Mark the active file as completed
    pub fn complete_file(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All frames processed");
        }
        self.round_bar.finish();
        let _ = self.multi_progress.clear();
    }
}
