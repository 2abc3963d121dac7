//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read the requirement file (see `envreq-config`).

use clap::{Parser, Subcommand};
use envreq_config::constants::{DEFAULT_REQFILE_NAME, REQFILE_ENV_VAR};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envreq-cli")]
#[command(about = "envreq CLI - Inspect the configuration a binary requires", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envreq-cli list\n  envreq-cli list --required-only\n  envreq-cli --reqfile ./build/env.req check\n  envreq-cli -o json list\n"
)]
pub struct Cli {
    /// Path to the requirement file written by the application.
    ///
    /// Can also be set via the ENVREQ_FILE environment variable.
    #[arg(short, long, global = true, env = REQFILE_ENV_VAR, value_name = "FILE", default_value = DEFAULT_REQFILE_NAME)]
    pub reqfile: PathBuf,

    /// Output format (json, table)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every configuration key the application has requested
    List {
        /// Only show keys that were requested without a default
        #[arg(long)]
        required_only: bool,
    },

    /// Verify that every required key is present in the current environment
    Check,
}
