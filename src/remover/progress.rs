// Progress counters, stop signal and the status line thread

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::Shared;

/// Shared counters updated by the walking thread and the workers.
///
/// `processed <= discovered` holds at every point: tasks are counted before
/// they are queued, and every worker increments `processed` exactly once per
/// task, successful or not. Equality means the queue has drained.
#[derive(Default)]
pub struct Progress {
    discovered: AtomicU64,
    processed: AtomicU64,
}

impl Progress {
    pub fn add_discovered(&self) {
        self.discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn discovered(&self) -> u64 {
        self.discovered.load(Ordering::Relaxed)
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn drained(&self) -> bool {
        self.processed() >= self.discovered()
    }
}

/// One-way stop flag shared by the coordinator, the workers and the status
/// reporter. Flips false to true exactly once and is never reset.
pub struct StopSignal {
    raised: AtomicBool,
    lock: Mutex<()>,
    signal: Condvar,
}

impl StopSignal {
    pub fn new() -> Self {
        StopSignal {
            raised: AtomicBool::new(false),
            lock: Mutex::new(()),
            signal: Condvar::new(),
        }
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
        // Taking the lock pairs the store with any in-flight wait below.
        let _guard = self.lock.lock().unwrap();
        self.signal.notify_all();
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Blocks for at most `timeout`, waking early when the flag is raised.
    pub fn wait_timeout(&self, timeout: Duration) {
        let guard = self.lock.lock().unwrap();
        if !self.is_raised() {
            let _ = self.signal.wait_timeout(guard, timeout);
        }
    }
}

/// Status line thread. Re-renders a single overwritten line roughly every
/// 10ms while the removal runs, keeps rendering until the queue has drained,
/// then clears the line if anything was printed.
pub struct Reporter {
    handle: JoinHandle<()>,
}

impl Reporter {
    pub fn spawn(shared: Arc<Shared>) -> Self {
        Reporter {
            handle: thread::spawn(move || run(&shared)),
        }
    }

    pub fn join(self) {
        let _ = self.handle.join();
    }
}

fn run(shared: &Shared) {
    let mut has_printed = false;
    while !shared.stop.is_raised() || !shared.progress.drained() {
        shared.stop.wait_timeout(Duration::from_millis(10));
        let discovered = shared.progress.discovered();
        if discovered == 0 {
            continue;
        }
        let processed = shared.progress.processed();
        // The ~ disappears once stopping is requested: counts are final then.
        let about = if shared.stop.is_raised() { "" } else { "~" };
        has_printed = true;
        print!(
            "\r({} / {}) ... {}{}% ",
            processed,
            discovered,
            about,
            processed * 100 / discovered
        );
        let _ = io::stdout().flush();
    }
    if has_printed {
        print!("\x1b[2K\r");
        let _ = io::stdout().flush();
    }
}
