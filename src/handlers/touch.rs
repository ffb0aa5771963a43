// Touch handler

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub fn handle_touch(no_create: bool, reference: Option<&Path>, files: &[PathBuf]) -> Result<i32> {
    let timestamp = match reference {
        Some(reference) => fs::metadata(reference)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("failed to get attributes of '{}'", reference.display()))?,
        None => SystemTime::now(),
    };

    let mut exitcode = 0;
    for path in files {
        if let Err(err) = touch_one(path, timestamp, no_create) {
            eprintln!("ck: cannot touch '{}': {}", path.display(), err);
            exitcode = 1;
        }
    }
    Ok(exitcode)
}

fn touch_one(path: &Path, timestamp: SystemTime, no_create: bool) -> io::Result<()> {
    if !path.exists() {
        if no_create {
            return Ok(());
        }
        File::create(path)?;
    }
    // Directories can't be opened for writing, fall back to a read handle.
    let file = File::options()
        .write(true)
        .open(path)
        .or_else(|_| File::open(path))?;
    file.set_modified(timestamp)
}
