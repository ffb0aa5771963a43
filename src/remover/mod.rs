//! Parallel recursive remover.
//!
//! Walks a directory tree and fans the per-entry deletions out to a fixed
//! worker pool while a status thread renders a live progress line. Workers
//! only unlink files and symlinks; directories are counted but left in place
//! and swept up by one final `remove_dir_all` after every queued task has
//! drained, so no directory is ever removed while a worker is still busy
//! below it.
//!
//! The first failing worker records its path and raises the stop signal; no
//! new task is submitted after that, already-queued tasks still drain, and
//! the final sweep is skipped so the partial state is reported instead of
//! papered over.

pub mod entry;
pub mod pool;
pub mod progress;
pub mod safety;
pub mod walker;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use self::pool::{DeletionTask, WorkerPool};
use self::progress::{Progress, Reporter, StopSignal};
use self::walker::Walker;

pub struct RemoveOptions {
    pub force: bool,
    pub recursive: bool,
    /// Worker count for the parallel engine; 0 means one per CPU.
    pub threads: usize,
}

/// Outcome of one parallel removal run.
pub struct RemoveReport {
    pub discovered: u64,
    pub processed: u64,
    /// First path that could not be deleted, if any.
    pub failed: Option<PathBuf>,
}

/// State shared between the coordinator, the workers and the status reporter.
pub struct Shared {
    pub progress: Progress,
    pub stop: StopSignal,
    pub failure: FailureSlot,
}

impl Shared {
    pub fn new() -> Self {
        Shared {
            progress: Progress::default(),
            stop: StopSignal::new(),
            failure: FailureSlot::new(),
        }
    }
}

/// Holds the path of the first failed deletion; later failures are dropped.
pub struct FailureSlot(Mutex<Option<PathBuf>>);

impl FailureSlot {
    pub fn new() -> Self {
        FailureSlot(Mutex::new(None))
    }

    pub fn record(&self, path: PathBuf) {
        let mut slot = self.0.lock().unwrap();
        if slot.is_none() {
            *slot = Some(path);
        }
    }

    pub fn take(&self) -> Option<PathBuf> {
        self.0.lock().unwrap().take()
    }
}

/// Removes `root` and everything below it.
///
/// Returns a walk-level error if the root itself cannot be opened; every
/// other failure ends up in the report. When a deletion failed, the final
/// sweep is skipped and the tree is left partially deleted.
pub fn remove_tree(root: &Path, opts: &RemoveOptions) -> Result<RemoveReport> {
    let walker = Walker::new(root)
        .with_context(|| format!("cannot open directory '{}'", root.display()))?;

    let shared = Arc::new(Shared::new());
    let reporter = Reporter::spawn(Arc::clone(&shared));

    let workers = if opts.threads > 0 {
        opts.threads
    } else {
        num_cpus::get()
    };
    debug!("removing {} with {} workers", root.display(), workers);

    let pool = WorkerPool::spawn(workers, Arc::clone(&shared));
    for entry in walker {
        if shared.stop.is_raised() {
            break;
        }
        shared.progress.add_discovered();
        pool.submit(DeletionTask {
            path: entry.path,
            is_dir: entry.is_dir,
        });
    }

    shared.stop.raise();
    pool.join();
    reporter.join();

    let failed = shared.failure.take();
    if failed.is_none() {
        // Only the directory skeleton is left at this point.
        match fs::remove_dir_all(root) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| format!("cannot remove '{}'", root.display()));
            }
        }
    }

    Ok(RemoveReport {
        discovered: shared.progress.discovered(),
        processed: shared.progress.processed(),
        failed,
    })
}
