// Deletion worker pool

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::Shared;
use super::entry;

/// One filesystem entry queued for deletion. Consumed exactly once, never
/// retried.
pub struct DeletionTask {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Fixed set of worker threads consuming deletion tasks from a shared queue.
pub struct WorkerPool {
    queue: Sender<DeletionTask>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn spawn(size: usize, shared: Arc<Shared>) -> Self {
        let (queue, tasks) = unbounded::<DeletionTask>();
        let workers = (0..size.max(1))
            .map(|_| {
                let tasks = tasks.clone();
                let shared = Arc::clone(&shared);
                thread::spawn(move || worker(&tasks, &shared))
            })
            .collect();
        WorkerPool { queue, workers }
    }

    /// Queues a task; never blocks the submitting thread.
    pub fn submit(&self, task: DeletionTask) {
        let _ = self.queue.send(task);
    }

    /// Closes the queue and blocks until every queued task has been
    /// processed and all workers have exited.
    pub fn join(self) {
        drop(self.queue);
        for worker in self.workers {
            let _ = worker.join();
        }
    }
}

fn worker(tasks: &Receiver<DeletionTask>, shared: &Shared) {
    for task in tasks.iter() {
        // Directories are swept up at the end, once their contents are gone.
        if !task.is_dir {
            if let Err(err) = entry::remove_file_entry(&task.path) {
                debug!("failed to remove {}: {}", task.path.display(), err);
                shared.failure.record(task.path);
                shared.stop.raise();
            }
        }
        // Processed even on failure: the task is done, just unsuccessfully.
        shared.progress.add_processed();
    }
}
