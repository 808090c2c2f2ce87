//! Notebook command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and `NOTEBOOK_*` variables.
//! - Run exactly one core operation and print its JSON result.
//! - Keep exit codes stable per error kind for scripting.

mod cli;

use clap::Parser;
use cli::{exit_code, run, Cli, EXIT_INTERNAL, EXIT_SUCCESS};
use log::info;
use notebook_core::{Notebook, NotebookConfig};
use std::process;

fn main() {
    let code = run_cli(Cli::parse());
    // Buffered file logs are not flushed by `process::exit`.
    log::logger().flush();
    process::exit(code);
}

fn run_cli(cli: Cli) -> i32 {
    let config = cli.config(NotebookConfig::from_env());

    if let Err(err) = config.init_logging() {
        eprintln!("error: {err}");
        return EXIT_INTERNAL;
    }

    let mut notebook = match Notebook::open_with_config(&config) {
        Ok(notebook) => notebook,
        Err(err) => {
            eprintln!("error: {err}");
            return exit_code(err.kind());
        }
    };
    info!(
        "event=cli_start module=cli status=ok persistent={}",
        config.db_path.is_some()
    );

    let value = match run(&mut notebook, cli.command) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("error ({}): {err}", err.kind().as_str());
            return exit_code(err.kind());
        }
    };

    match serde_json::to_string_pretty(&value) {
        Ok(text) => {
            println!("{text}");
            EXIT_SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            EXIT_INTERNAL
        }
    }
}
