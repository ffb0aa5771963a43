mod cli;
mod config;
mod handlers;
mod remover;
mod term;

use clap::Parser;
use cli::{Cli, Commands};
use handlers::{cat, env, ls, rm, touch};

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let settings = config::load().unwrap_or_else(|err| {
        log::warn!("ignoring config: {err:#}");
        config::Settings::default()
    });

    let result = match cli.command {
        Commands::Cat { file } => cat::handle_cat(file.as_deref()),
        Commands::Ls { path } => ls::handle_ls(&path, &settings),
        Commands::Env { chdir, command } => env::handle_env(chdir.as_deref(), &command),
        Commands::Touch {
            no_create,
            reference,
            files,
        } => touch::handle_touch(no_create, reference.as_deref(), &files),
        Commands::Rm {
            force,
            recursive,
            files,
        } => rm::handle_rm(force, recursive, &files, &settings),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("ck: {err:#}");
            std::process::exit(1);
        }
    }
}
