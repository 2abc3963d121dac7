//! Output formatters for CLI commands.
//!
//! Provides two output formats: a human-readable table and JSON for
//! machine consumers (deployment pipelines, provisioning scripts).

use anyhow::Result;
use serde::Serialize;

use envreq_config::Ledger;
use envreq_config::ledger::NO_DEFAULT;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// One requirement-file entry, as shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementRow {
    /// Configuration key name.
    pub key: String,
    /// Whether the key was ever requested without a default.
    pub required: bool,
    /// Distinct real defaults recorded for the key (the no-default
    /// marker is folded into `required`).
    pub defaults: Vec<String>,
}

/// Outcome of a `check` run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// True when every required key is present in the environment.
    pub ok: bool,
    /// Required keys absent from the environment, in sorted key order.
    pub missing: Vec<String>,
    /// Total number of required keys in the requirement file.
    pub required: usize,
}

/// Flatten a ledger into display rows, in sorted key order.
pub fn requirement_rows(ledger: &Ledger, required_only: bool) -> Vec<RequirementRow> {
    ledger
        .iter()
        .filter(|(key, _)| !required_only || ledger.is_required(key))
        .map(|(key, defaults)| RequirementRow {
            key: key.to_string(),
            required: defaults.iter().any(|d| d == NO_DEFAULT),
            defaults: defaults
                .iter()
                .filter(|d| *d != NO_DEFAULT)
                .cloned()
                .collect(),
        })
        .collect()
}

/// Format requirement rows for display.
pub fn format_requirements(format: OutputFormat, rows: &[RequirementRow]) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Table => Ok(requirements_table(rows)),
    }
}

/// Format a check report for display.
pub fn format_check_report(format: OutputFormat, report: &CheckReport) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            if report.ok {
                Ok(format!(
                    "OK: all {} required keys are present",
                    report.required
                ))
            } else {
                Ok(format!("Missing keys {:?}", report.missing))
            }
        }
    }
}

fn requirements_table(rows: &[RequirementRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let key_width = rows
        .iter()
        .map(|r| r.key.len())
        .max()
        .unwrap_or(0)
        .max("KEY".len());

    let mut out = format!("{:key_width$}  {:8}  DEFAULTS\n", "KEY", "REQUIRED");
    for row in rows {
        let defaults = if row.defaults.is_empty() {
            "-".to_string()
        } else {
            row.defaults.join(", ")
        };
        let required = if row.required { "yes" } else { "no" };
        out.push_str(&format!(
            "{:key_width$}  {:8}  {}\n",
            row.key, required, defaults
        ));
    }
    out
}
