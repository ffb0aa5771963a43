// Rm handler
//
// Thin CLI layer over the remover engine: flag handling, per-target safety
// checks and the sequential (non-force) recursion. The parallel engine only
// runs for the recursive+force combination.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::remover::{self, RemoveOptions, entry, safety};
use crate::term;

pub fn handle_rm(force: bool, recursive: bool, files: &[PathBuf], settings: &Settings) -> Result<i32> {
    let mut exitcode = 0;

    // Guard against an accidental `rm -rf *` in a big directory: with several
    // operands of mixed kind, ask once up front.
    if term::may_prompt() && files.len() > 3 {
        let folders = files.iter().filter(|path| path.is_dir()).count();
        let plain = files.len() - folders;
        if folders > 1 && plain > 1 {
            print!("Delete {} folders and {} files? ", folders, plain);
            if !term::ask_yes() {
                return Ok(1);
            }
        }
    }

    let opts = RemoveOptions {
        force,
        recursive,
        threads: settings.rm.threads.unwrap_or(0),
    };

    for path in files {
        match remove_target(path, &opts) {
            Ok(code) => exitcode = exitcode.max(code),
            Err(err) => {
                eprintln!("ck: cannot remove '{}': {}", path.display(), err);
                exitcode = 1;
            }
        }
    }
    Ok(exitcode)
}

/// Handles one command-line operand: safety checks when recursing, then the
/// actual removal.
fn remove_target(path: &Path, opts: &RemoveOptions) -> Result<i32> {
    if opts.recursive {
        let canonical = match fs::canonicalize(path) {
            Ok(canonical) => canonical,
            Err(err) if err.kind() == io::ErrorKind::NotFound && opts.force => return Ok(0),
            Err(err) => {
                eprintln!("ck: cannot remove '{}': {}", path.display(), err);
                return Ok(1);
            }
        };
        match safety::check(&canonical) {
            safety::Check::Protected(warning) => {
                print!("{} ", warning);
                if term::may_prompt() {
                    print!("Continue? ");
                    if !term::ask_yes() {
                        return Ok(0);
                    }
                } else {
                    println!("Skipping.");
                    return Ok(1);
                }
            }
            safety::Check::Confirm(warning) => {
                if term::may_prompt() {
                    print!("{} Continue? ", warning);
                    if !term::ask_yes() {
                        return Ok(0);
                    }
                }
            }
            safety::Check::Clear => {}
        }
    }
    remove_path(path, opts)
}

fn remove_path(path: &Path, opts: &RemoveOptions) -> Result<i32> {
    let is_dir = fs::symlink_metadata(path)
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    let mut exitcode = 0;

    if is_dir {
        if !opts.recursive {
            eprintln!("ck: cannot remove '{}': Is a directory", path.display());
            return Ok(1);
        }
        if opts.force {
            let report = remover::remove_tree(path, opts)?;
            if let Some(failed) = report.failed {
                eprintln!("\nCouldn't delete {}", failed.display());
                return Ok(1);
            }
            return Ok(0);
        }
        // Sequential recursion: children first, the directory itself below.
        for child in fs::read_dir(path)? {
            let child = child?;
            exitcode = exitcode.max(remove_path(&child.path(), opts)?);
        }
    }

    if !opts.force && term::may_prompt() && write_protected(path) {
        print!("ck: remove write-protected file '{}'? ", path.display());
        if !term::ask_yes() {
            return Ok(exitcode);
        }
    }

    match entry::remove_any(path) {
        Ok(true) => Ok(exitcode),
        Ok(false) => {
            if opts.force {
                Ok(exitcode)
            } else {
                eprintln!(
                    "ck: cannot remove '{}': No such file or directory",
                    path.display()
                );
                Ok(1)
            }
        }
        Err(err) => {
            eprintln!("ck: cannot remove '{}': {}", path.display(), err);
            Ok(1)
        }
    }
}

fn write_protected(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.permissions().readonly())
        .unwrap_or(false)
}
