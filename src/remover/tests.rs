use super::pool::{DeletionTask, WorkerPool};
use super::progress::StopSignal;
use super::walker::Walker;
use super::*;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn options() -> RemoveOptions {
    RemoveOptions {
        force: true,
        recursive: true,
        threads: 2,
    }
}

fn build_tree(root: &Path) {
    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::create_dir_all(root.join("c")).unwrap();
    File::create(root.join("top.txt")).unwrap();
    File::create(root.join("a/mid.txt")).unwrap();
    File::create(root.join("a/b/leaf.txt")).unwrap();
    File::create(root.join("c/other.txt")).unwrap();
}

#[test]
fn removes_entire_tree() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("victim");
    build_tree(&root);

    let report = remove_tree(&root, &options()).unwrap();
    assert!(!root.exists());
    assert!(report.failed.is_none());
    assert_eq!(report.discovered, report.processed);
}

#[test]
fn counts_every_entry_in_a_flat_directory() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("flat");
    fs::create_dir(&root).unwrap();
    for i in 0..5 {
        File::create(root.join(format!("file{}.txt", i))).unwrap();
    }

    let report = remove_tree(&root, &options()).unwrap();
    assert_eq!(report.discovered, 5);
    assert_eq!(report.processed, 5);
    assert!(report.failed.is_none());
    assert!(!root.exists());
}

#[test]
fn fails_fast_when_root_is_missing() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");
    assert!(remove_tree(&missing, &options()).is_err());
}

#[test]
fn walker_yields_each_entry_exactly_once() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree");
    build_tree(&root);

    let entries: Vec<_> = Walker::new(&root).unwrap().collect();
    let mut paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), entries.len());
    // 3 directories + 4 files, root itself excluded
    assert_eq!(entries.len(), 7);
    assert!(!paths.contains(&root));
}

#[test]
fn walker_yields_directories_before_their_contents() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree");
    build_tree(&root);

    let paths: Vec<_> = Walker::new(&root).unwrap().map(|e| e.path).collect();
    let dir = paths.iter().position(|p| p == &root.join("a")).unwrap();
    let child = paths.iter().position(|p| p == &root.join("a/mid.txt")).unwrap();
    assert!(dir < child);
}

#[test]
fn walker_fails_on_unopenable_root() {
    let tmp = TempDir::new().unwrap();
    assert!(Walker::new(&tmp.path().join("nope")).is_err());
}

#[test]
fn failure_slot_keeps_the_first_record() {
    let slot = FailureSlot::new();
    slot.record("first".into());
    slot.record("second".into());
    assert_eq!(slot.take(), Some("first".into()));
}

#[test]
fn racing_failures_record_exactly_one_path() {
    let slot = Arc::new(FailureSlot::new());
    let workers: Vec<_> = (0..8)
        .map(|i| {
            let slot = Arc::clone(&slot);
            thread::spawn(move || slot.record(format!("path{}", i).into()))
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let recorded = slot.take().expect("one failure must be recorded");
    let name = recorded.to_string_lossy();
    assert!(name.starts_with("path"));
    assert!(slot.take().is_none());
}

#[test]
fn stop_signal_is_monotone() {
    let stop = StopSignal::new();
    assert!(!stop.is_raised());
    stop.raise();
    assert!(stop.is_raised());
    stop.raise();
    assert!(stop.is_raised());
}

#[test]
fn raised_signal_does_not_block_waiters() {
    let stop = StopSignal::new();
    stop.raise();
    let start = Instant::now();
    stop.wait_timeout(Duration::from_secs(10));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn workers_leave_directories_alone() {
    let tmp = TempDir::new().unwrap();
    let keep = tmp.path().join("keep");
    fs::create_dir(&keep).unwrap();

    let shared = Arc::new(Shared::new());
    let pool = WorkerPool::spawn(1, Arc::clone(&shared));
    pool.submit(DeletionTask {
        path: keep.clone(),
        is_dir: true,
    });
    pool.join();

    assert!(keep.exists());
    assert_eq!(shared.progress.processed(), 1);
    assert!(shared.failure.take().is_none());
}

#[test]
fn already_absent_entries_count_as_processed() {
    let tmp = TempDir::new().unwrap();
    let shared = Arc::new(Shared::new());
    let pool = WorkerPool::spawn(1, Arc::clone(&shared));
    pool.submit(DeletionTask {
        path: tmp.path().join("ghost.txt"),
        is_dir: false,
    });
    pool.join();

    assert_eq!(shared.progress.processed(), 1);
    assert!(shared.failure.take().is_none());
    assert!(!shared.stop.is_raised());
}

#[test]
fn progress_stays_bounded_while_submitting() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree");
    fs::create_dir(&root).unwrap();
    for i in 0..50 {
        File::create(root.join(format!("file{}.txt", i))).unwrap();
    }

    let shared = Arc::new(Shared::new());
    let pool = WorkerPool::spawn(4, Arc::clone(&shared));
    for entry in Walker::new(&root).unwrap() {
        shared.progress.add_discovered();
        pool.submit(DeletionTask {
            path: entry.path,
            is_dir: entry.is_dir,
        });
        assert!(shared.progress.processed() <= shared.progress.discovered());
    }
    shared.stop.raise();
    pool.join();

    assert_eq!(shared.progress.processed(), shared.progress.discovered());
    assert_eq!(shared.progress.discovered(), 50);
}

#[test]
fn removes_read_only_files_in_force_mode() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree");
    fs::create_dir(&root).unwrap();
    let guarded = root.join("guarded.txt");
    File::create(&guarded).unwrap();
    let mut permissions = fs::metadata(&guarded).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&guarded, permissions).unwrap();

    let report = remove_tree(&root, &options()).unwrap();
    assert!(report.failed.is_none());
    assert!(!root.exists());
}

#[cfg(unix)]
#[test]
fn first_failure_is_reported_and_cleanup_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree");
    let locked = root.join("locked");
    fs::create_dir_all(&locked).unwrap();
    let blocked = locked.join("blocked.txt");
    let probe = locked.join("probe.txt");
    File::create(&blocked).unwrap();
    File::create(&probe).unwrap();
    // Drop write permission on the directory so the children can't be unlinked.
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Root ignores directory permissions; nothing to test then.
    if fs::remove_file(&probe).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let report = remove_tree(&root, &options()).unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let failed = report.failed.expect("a failure must be recorded");
    assert!(failed == blocked || failed == probe);
    assert!(root.exists(), "failed runs must skip the final sweep");
}

#[cfg(unix)]
#[test]
fn unreadable_subtree_does_not_panic_the_walk() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree");
    let sealed = root.join("sealed");
    fs::create_dir_all(&sealed).unwrap();
    File::create(root.join("open.txt")).unwrap();
    // No read permission: the walker can't enumerate the subtree.
    fs::set_permissions(&sealed, fs::Permissions::from_mode(0o000)).unwrap();

    let entries: Vec<_> = Walker::new(&root).unwrap().collect();

    fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).unwrap();

    // The sealed directory itself is still yielded, its contents are not.
    assert!(entries.iter().any(|e| e.path == sealed));
    assert!(entries.iter().any(|e| e.path == root.join("open.txt")));
}
