mod pool;

pub use pool::{TaskFailure, TaskHandler, WorkerPool};

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, SpellcheckError};
use crate::output::ScanProgress;
use crate::scanner::{DirectoryScanner, FileFilter, FilterChain};

pub const DEFAULT_QUEUE_CAPACITY: usize = 5000;

/// Callback invoked once per accepted file, on a worker thread.
pub trait FileListener: Send + Sync {
    /// # Errors
    /// Returns an error if the file could not be processed. The error is
    /// recorded for this file only; other files keep being processed.
    fn handle_file(&self, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub threads: usize,
    pub queue_capacity: usize,
    pub respect_gitignore: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            respect_gitignore: false,
        }
    }
}

/// Available parallelism, or 1 when it cannot be determined.
#[must_use]
pub fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

#[derive(Debug, Default)]
pub struct CrawlSummary {
    pub files_submitted: usize,
    pub failures: Vec<TaskFailure>,
}

/// Walks root directories and fans accepted files out to a worker pool.
pub struct FileCrawler {
    config: CrawlConfig,
    filters: FilterChain,
    listeners: Vec<Arc<dyn FileListener>>,
    progress: Option<ScanProgress>,
}

impl FileCrawler {
    #[must_use]
    pub fn new(config: CrawlConfig) -> Self {
        Self {
            config,
            filters: FilterChain::new(),
            listeners: Vec::new(),
            progress: None,
        }
    }

    pub fn add_filter(&mut self, filter: impl FileFilter + 'static) {
        self.filters.push(filter);
    }

    pub fn add_listener(&mut self, listener: Arc<dyn FileListener>) {
        self.listeners.push(listener);
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ScanProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Crawl every root and block until all discovered files are handled.
    ///
    /// # Errors
    /// Returns `PathNotFound` or `NotADirectory` before any traversal if a
    /// root is invalid, and a pool error if the workers cannot be started
    /// or stop unexpectedly. Per-file failures are returned in the summary.
    pub fn crawl(self, roots: &[PathBuf]) -> Result<CrawlSummary> {
        validate_roots(roots)?;

        let listeners = Arc::new(self.listeners);
        let handler: TaskHandler = Arc::new(move |path: &Path| notify_all(&listeners, path));
        let pool = WorkerPool::new(self.config.threads, self.config.queue_capacity, handler)?;

        let filter: Arc<dyn FileFilter> = Arc::new(self.filters);
        let scanner = DirectoryScanner::with_gitignore(filter, self.config.respect_gitignore);

        info!(
            roots = roots.len(),
            threads = pool.worker_count(),
            "Starting crawl"
        );

        let mut files_submitted = 0;
        for root in roots {
            debug!(root = %root.display(), "Walking root");
            files_submitted += scanner.visit(root, |path| {
                pool.submit(path)?;
                if let Some(progress) = &self.progress {
                    progress.inc();
                }
                Ok(())
            })?;
        }

        let failures = pool.shutdown()?;
        if let Some(progress) = &self.progress {
            progress.finish();
        }

        info!(
            files = files_submitted,
            failed = failures.len(),
            "Crawl complete"
        );

        Ok(CrawlSummary {
            files_submitted,
            failures,
        })
    }
}

/// Every root must exist and be a directory.
///
/// # Errors
/// Returns `PathNotFound` or `NotADirectory` for the first invalid root.
pub fn validate_roots(roots: &[PathBuf]) -> Result<()> {
    for root in roots {
        if !root.exists() {
            return Err(SpellcheckError::PathNotFound(root.clone()));
        }
        if !root.is_dir() {
            return Err(SpellcheckError::NotADirectory(root.clone()));
        }
    }
    Ok(())
}

fn notify_all(listeners: &[Arc<dyn FileListener>], path: &Path) -> Result<()> {
    let mut first_error = None;
    for listener in listeners {
        if let Err(e) = listener.handle_file(path) {
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
