// Env handler: run a command through the shell, optionally elsewhere

use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use std::process::Command;

pub fn handle_env(chdir: Option<&Path>, command: &[String]) -> Result<i32> {
    if let Some(dir) = chdir {
        env::set_current_dir(dir)
            .with_context(|| format!("cannot change directory to '{}'", dir.display()))?;
    }
    if command.is_empty() {
        return Ok(0);
    }

    let shell = detect_shell();
    // "cmd" wants /C, every sh-like shell takes -c
    let flag = if shell.contains("cmd") && !shell.contains("sh") {
        "/C"
    } else {
        "-c"
    };
    let cmd_line = shell_words::join(command);

    let status = Command::new(&shell)
        .arg(flag)
        .arg(&cmd_line)
        .status()
        .with_context(|| format!("Failed to spawn {}", shell))?;
    Ok(status.code().unwrap_or(1))
}

fn detect_shell() -> String {
    env::var("SHELL").unwrap_or_else(|_| {
        if cfg!(windows) {
            "cmd".to_string()
        } else {
            "sh".to_string()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn propagates_child_exit_code() {
        let command = vec!["sh".to_string(), "-c".to_string(), "exit 3".to_string()];
        assert_eq!(handle_env(None, &command).unwrap(), 3);
    }

    #[test]
    fn empty_command_is_success() {
        assert_eq!(handle_env(None, &[]).unwrap(), 0);
    }
}
