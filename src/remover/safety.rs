// Safety checks performed before any recursive removal starts

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Verdict for one canonicalized removal target.
pub enum Check {
    /// Deleting home or an ancestor of it: confirm when interactive,
    /// otherwise skip the target and fail.
    Protected(&'static str),
    /// Deleting the working directory or an ancestor of it: confirm when
    /// interactive, proceed otherwise.
    Confirm(&'static str),
    Clear,
}

pub fn check(canonical: &Path) -> Check {
    check_against(
        canonical,
        home_dir().as_deref(),
        env::current_dir().ok().as_deref(),
    )
}

fn check_against(canonical: &Path, home: Option<&Path>, cwd: Option<&Path>) -> Check {
    if let Some(home) = home {
        if canonical == home {
            return Check::Protected("You're trying to delete your home directory.");
        }
        if contains_path(canonical, home) {
            return Check::Protected(
                "You're trying to delete a path which is above your home directory.",
            );
        }
    }
    if let Some(cwd) = cwd {
        if canonical == cwd {
            return Check::Confirm("You're trying to delete your current working directory.");
        }
        if contains_path(canonical, cwd) {
            return Check::Confirm(
                "You're trying to delete a path which is above your current working directory.",
            );
        }
    }
    Check::Clear
}

fn home_dir() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(fs::canonicalize(&home).unwrap_or(home))
}

/// True when `inner` lives somewhere below `dir` (`inner` itself excluded,
/// its parent chain included). Both paths must already be canonical.
pub fn contains_path(dir: &Path, inner: &Path) -> bool {
    match inner.parent() {
        Some(parent) => parent.starts_with(dir),
        None => false,
    }
}
