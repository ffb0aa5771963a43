use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ck", version, about = "CoreKit: Minimalist Coreutils Multitool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Concatenate FILE, or standard input, to standard output
    Cat { file: Option<PathBuf> },

    /// List information about PATH (the current directory by default)
    Ls {
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Run COMMAND through the shell
    Env {
        /// Change working directory to DIR before running COMMAND
        #[arg(short = 'C', long = "chdir", value_name = "DIR")]
        chdir: Option<PathBuf>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Update the modification time of each FILE to the current time
    Touch {
        /// Do not create any files
        #[arg(short = 'c', long = "no-create")]
        no_create: bool,

        /// Use this file's times instead of the current time
        #[arg(short = 'r', long = "reference", value_name = "FILE")]
        reference: Option<PathBuf>,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Remove (unlink) the FILE(s)
    Rm {
        /// Ignore nonexistent files and arguments, never prompt
        #[arg(short = 'f', long = "force")]
        force: bool,

        /// Remove directories and their contents recursively
        #[arg(short = 'r', visible_short_alias = 'R', long = "recursive")]
        recursive: bool,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
