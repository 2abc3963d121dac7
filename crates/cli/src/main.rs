//! envreq CLI - Inspect the configuration a binary requires.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Read the persisted requirement file and report its contents.
//! - Check the current environment against the required keys.
//!
//! Does NOT handle:
//! - Recording requirements (the application does that via
//!   `envreq-config` as it resolves configuration).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide
//!   clap env defaults (e.g. ENVREQ_FILE) and `check` sees the same
//!   environment the application would.

mod args;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = envreq_config::load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match run_command(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
