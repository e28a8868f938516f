//! safer-claude CLI
//!
//! Runs a coding agent on a throwaway copy of a file or directory and
//! syncs its changes back.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::Cli;
use commands::SessionOptions;
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = SessionOptions {
        target: cli.target,
        agent: cli.agent,
        config: cli.config,
        agent_args: cli.agent_args,
        keep_workspace: cli.keep_workspace,
        dry_run: cli.dry_run,
        json: cli.json,
    };

    let outcome = commands::run_session(&options)?;
    Ok(outcome.exit_code())
}

/// Log to stderr: DEBUG with `--verbose`, otherwise `RUST_LOG` (default `warn`).
fn init_tracing(verbose: bool) {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_writer(std::io::stderr)
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = FmtSubscriber::builder()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    if let Err(e) = result {
        eprintln!("{}: could not set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");
}
