use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner counting files handed to the workers during a crawl.
///
/// The total is unknown while the walk is still running, so this is a
/// counter rather than a bar. Disabled in quiet mode or when stderr is not a TTY.
#[derive(Clone)]
pub struct ScanProgress {
    progress_bar: ProgressBar,
    counter: Arc<AtomicU64>,
}

impl ScanProgress {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(quiet, is_tty)
    }

    fn new_with_visibility(quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_spinner()
        };

        Self {
            progress_bar,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    fn create_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} Checking {pos} files ({elapsed})")
                .expect("valid template"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }

    /// Count one more file. Safe to call from any thread.
    pub fn inc(&self) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_position(count);
    }

    /// Finishes the spinner and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
