//! Line codec for the requirement file.
//!
//! Responsibilities:
//! - Parse requirement file contents into a `Ledger`.
//! - Encode a `Ledger` back into the line format.
//!
//! Does NOT handle:
//! - File I/O (see `store`).
//!
//! Invariants:
//! - One line per key: `key=default1,default2,...`.
//! - Keys are encoded in sorted order so rewrites are deterministic.
//! - `key=` decodes to the single default `""` (required, no default).
//! - No escaping exists for `=`, `,`, or newlines inside keys or values.

use std::path::Path;

use super::{Ledger, LedgerFileError};

/// Parse the full contents of a requirement file.
///
/// Blank lines are ignored. Each key's defaults are deduplicated in
/// first-seen order, so files edited by hand still load as valid sets.
pub(crate) fn parse_ledger(content: &str, path: &Path) -> Result<Ledger, LedgerFileError> {
    let mut ledger = Ledger::new();
    for (index, line) in content.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let Some((key, defaults)) = line.split_once('=') else {
            return Err(LedgerFileError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
            });
        };
        if key.is_empty() {
            return Err(LedgerFileError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
            });
        }
        for default in defaults.split(',') {
            ledger.record(key, default);
        }
    }
    Ok(ledger)
}

/// Encode a ledger as requirement file contents.
pub(crate) fn encode_ledger(ledger: &Ledger) -> String {
    let mut out = String::new();
    for (key, defaults) in ledger.iter() {
        out.push_str(key);
        out.push('=');
        out.push_str(&defaults.join(","));
        out.push('\n');
    }
    out
}
