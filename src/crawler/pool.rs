use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, bounded};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{Result, SpellcheckError};

/// Work performed for every submitted file.
pub type TaskHandler = Arc<dyn Fn(&Path) -> Result<()> + Send + Sync>;

/// A file whose handler returned an error or panicked.
#[derive(Debug)]
pub struct TaskFailure {
    pub path: PathBuf,
    pub error: SpellcheckError,
}

/// Fixed set of worker threads fed from a bounded queue.
///
/// `submit` blocks while the queue is full. `shutdown` closes the queue and
/// returns only after every queued task has finished.
pub struct WorkerPool {
    sender: Option<Sender<PathBuf>>,
    workers: Vec<JoinHandle<()>>,
    failures: Arc<Mutex<Vec<TaskFailure>>>,
}

impl WorkerPool {
    /// Start `threads` workers and wait until each one is ready to take work.
    ///
    /// # Errors
    /// Returns a config error for a zero thread count or queue capacity, and
    /// a pool error if a worker thread cannot be spawned.
    pub fn new(threads: usize, queue_capacity: usize, handler: TaskHandler) -> Result<Self> {
        if threads == 0 {
            return Err(SpellcheckError::Config(
                "worker thread count must be at least 1".to_string(),
            ));
        }
        if queue_capacity == 0 {
            return Err(SpellcheckError::Config(
                "queue capacity must be at least 1".to_string(),
            ));
        }

        let (sender, receiver) = bounded::<PathBuf>(queue_capacity);
        let (ready_tx, ready_rx) = bounded::<()>(threads);
        let failures = Arc::new(Mutex::new(Vec::new()));
        let mut workers = Vec::with_capacity(threads);

        for id in 0..threads {
            let receiver = receiver.clone();
            let ready_tx = ready_tx.clone();
            let handler = Arc::clone(&handler);
            let failures = Arc::clone(&failures);

            let handle = thread::Builder::new()
                .name(format!("spellcheck-worker-{id}"))
                .spawn(move || {
                    let _ = ready_tx.send(());
                    drop(ready_tx);
                    while let Ok(path) = receiver.recv() {
                        if let Err(error) = run_task(handler.as_ref(), &path) {
                            warn!(path = %path.display(), %error, "task failed");
                            failures.lock().push(TaskFailure { path, error });
                        }
                    }
                    debug!(worker = id, "worker exiting");
                })
                .map_err(|e| SpellcheckError::Pool(format!("failed to spawn worker: {e}")))?;
            workers.push(handle);
        }
        drop(ready_tx);

        for _ in 0..threads {
            ready_rx
                .recv()
                .map_err(|_| SpellcheckError::Pool("worker exited before start".to_string()))?;
        }
        debug!(threads, queue_capacity, "worker pool started");

        Ok(Self {
            sender: Some(sender),
            workers,
            failures,
        })
    }

    /// Queue a file, blocking while the queue is full.
    ///
    /// # Errors
    /// Returns a pool error if the pool no longer accepts work.
    pub fn submit(&self, path: PathBuf) -> Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| SpellcheckError::Pool("pool is shut down".to_string()))?;
        sender
            .send(path)
            .map_err(|_| SpellcheckError::Pool("all workers have stopped".to_string()))
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Stop accepting work, wait for queued and running tasks, and return
    /// the failures collected along the way.
    ///
    /// # Errors
    /// Returns a pool error if a worker thread panicked outside a task.
    pub fn shutdown(mut self) -> Result<Vec<TaskFailure>> {
        self.sender = None;
        let mut panicked = 0;
        for handle in std::mem::take(&mut self.workers) {
            if handle.join().is_err() {
                panicked += 1;
            }
        }
        if panicked > 0 {
            return Err(SpellcheckError::Pool(format!(
                "{panicked} worker thread(s) panicked"
            )));
        }

        Ok(std::mem::take(&mut *self.failures.lock()))
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.sender = None;
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn run_task(handler: &(dyn Fn(&Path) -> Result<()> + Send + Sync), path: &Path) -> Result<()> {
    panic::catch_unwind(AssertUnwindSafe(|| handler(path)))
        .unwrap_or_else(|_| Err(SpellcheckError::Pool("task panicked".to_string())))
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
