// Tree walker

use log::warn;
use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

/// One filesystem entry produced by the walk.
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Lazy depth-first iterator over every entry strictly below a root
/// directory. Directories are yielded before their contents and each entry
/// is yielded exactly once; the order is otherwise unspecified.
///
/// Unreadable subtrees are logged and skipped rather than aborting the walk;
/// their directory entry has already been yielded, so the problem resurfaces
/// when the leftover directory cannot be swept at the end.
pub struct Walker {
    stack: Vec<ReadDir>,
}

impl Walker {
    /// Fails only when the root itself cannot be opened.
    pub fn new(root: &Path) -> io::Result<Self> {
        Ok(Walker {
            stack: vec![fs::read_dir(root)?],
        })
    }
}

impl Iterator for Walker {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<WalkEntry> {
        loop {
            let dir = self.stack.last_mut()?;
            let entry = match dir.next() {
                Some(Ok(entry)) => entry,
                Some(Err(err)) => {
                    warn!("skipping unreadable entry: {}", err);
                    continue;
                }
                None => {
                    self.stack.pop();
                    continue;
                }
            };
            // Symlinks to directories are unlinked as links, never descended.
            // An entry whose type cannot be read is handed to the workers as
            // a file so the failure surfaces as a normal deletion error.
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let path = entry.path();
            if is_dir {
                match fs::read_dir(&path) {
                    Ok(children) => self.stack.push(children),
                    Err(err) => warn!("cannot descend into {}: {}", path.display(), err),
                }
            }
            return Some(WalkEntry { path, is_dir });
        }
    }
}
