use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

/// Confirmation prompts are only allowed when stdin is attached to a terminal.
pub fn may_prompt() -> bool {
    io::stdin().is_terminal()
}

/// Reads one line from stdin and interprets it as a yes/no answer.
pub fn ask_yes() -> bool {
    let _ = io::stdout().flush();
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return false;
    }
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

/// Output width used for column layout. Honors COLUMNS, falls back to 80.
pub fn output_width() -> usize {
    env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse().ok())
        .filter(|width| *width > 0)
        .unwrap_or(80)
}
