// Ls handler

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use crate::config::Settings;
use crate::term;

struct Entry {
    name: String,
    directory: bool,
}

pub fn handle_ls(path: &Path, settings: &Settings) -> Result<i32> {
    let use_color = match settings.ls.color.as_deref() {
        Some("always") => true,
        Some("never") => false,
        _ => io::stdout().is_terminal(),
    };

    let mut entries = Vec::new();
    for entry in
        fs::read_dir(path).with_context(|| format!("cannot access '{}'", path.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let directory = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(Entry { name, directory });
    }

    print!("{}", layout(&entries, term::output_width(), use_color));
    Ok(0)
}

/// Lays entries out in columns sized by the longest name, wrapping at `width`.
fn layout(entries: &[Entry], width: usize, use_color: bool) -> String {
    let max_name = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);
    // two spaces between columns
    let column = max_name + 2;

    let mut out = String::new();
    let mut printed = 0;
    for entry in entries {
        if printed > 0 && printed + column > width {
            out.push('\n');
            printed = 0;
        }
        let name_width = entry.name.chars().count();
        if entry.directory && use_color {
            out.push_str(&entry.name.blue().bold().to_string());
        } else {
            out.push_str(&entry.name);
        }
        printed += column;
        if printed > width {
            out.push('\n');
            printed = 0;
        } else {
            out.push_str(&" ".repeat(column - name_width));
        }
    }
    if printed > 0 {
        out.push('\n');
    }
    out
}
