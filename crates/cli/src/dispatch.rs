//! Command dispatch.
//!
//! Responsibilities:
//! - Map parsed arguments to requirement-file operations.
//! - Translate outcomes into structured exit codes.
//!
//! Does NOT handle:
//! - Argument parsing (see `args`).
//! - Requirement-file semantics (see `envreq-config`).

use anyhow::{Context, Result};

use envreq_config::{LedgerStore, env_var_or_none};

use crate::args::{Cli, Commands};
use crate::error::ExitCode;
use crate::formatters::{
    CheckReport, OutputFormat, format_check_report, format_requirements, requirement_rows,
};

/// Execute the parsed command and return the exit code to use.
pub fn run_command(cli: Cli) -> Result<ExitCode> {
    let format = OutputFormat::parse(&cli.output)?;
    let store = LedgerStore::new(&cli.reqfile);

    match cli.command {
        Commands::List { required_only } => {
            let ledger = store.load().context("Failed to load requirement file")?;
            let rows = requirement_rows(&ledger, required_only);
            let rendered = format_requirements(format, &rows)?;
            if !rendered.is_empty() {
                println!("{rendered}");
            }
            Ok(ExitCode::Success)
        }

        Commands::Check => {
            let ledger = store.load().context("Failed to load requirement file")?;
            let required: Vec<&str> = ledger.required_keys().collect();
            let missing: Vec<String> = required
                .iter()
                .filter(|key| env_var_or_none(key).is_none())
                .map(|key| key.to_string())
                .collect();

            let report = CheckReport {
                ok: missing.is_empty(),
                missing,
                required: required.len(),
            };
            println!("{}", format_check_report(format, &report)?);

            if report.ok {
                Ok(ExitCode::Success)
            } else {
                tracing::warn!(
                    reqfile = %cli.reqfile.display(),
                    missing = report.missing.len(),
                    "required configuration keys are absent"
                );
                Ok(ExitCode::MissingKeys)
            }
        }
    }
}
