//! Requirement file persistence.
//!
//! Responsibilities:
//! - Read the persisted ledger from disk (absent file = empty ledger).
//! - Merge a newly requested (key, default) pair into the persisted state
//!   and rewrite the file in full.
//! - Keep rewrites atomic (temp file + rename).
//!
//! Does NOT handle:
//! - Serializing access across callers (the `Resolver` holds the lock).
//! - Cross-process write coordination; one writer process per file.
//!
//! Invariants:
//! - Every update is a full read-merge-write cycle, so requirements
//!   recorded by prior runs are never lost.
//! - A failed write surfaces as an error and leaves the previous file
//!   contents in place; readers never observe a partially written file.

use std::path::{Path, PathBuf};

use super::{Ledger, LedgerFileError, encode_ledger, parse_ledger};

/// Owns the requirement file path and the read-merge-write cycle.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Create a store backed by `path`. The file is created lazily on the
    /// first recorded request.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the requirement file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted ledger. An absent file reads as an empty ledger.
    pub fn load(&self) -> Result<Ledger, LedgerFileError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_ledger(&content, &self.path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Ledger::new()),
            Err(e) => Err(LedgerFileError::Read {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Merge `(key, default)` into the persisted ledger and rewrite it.
    ///
    /// Callers must serialize concurrent records against one path; the
    /// `Resolver` holds the lock that guards this cycle.
    pub(crate) fn record(&self, key: &str, default: &str) -> Result<(), LedgerFileError> {
        let mut ledger = self.load()?;
        ledger.record(key, default);
        self.save(&ledger)
    }

    /// Atomically rewrite the requirement file with `ledger`.
    ///
    /// Writes to a temporary file first, then renames it over the target,
    /// so a crash mid-write cannot truncate previously recorded state.
    fn save(&self, ledger: &Ledger) -> Result<(), LedgerFileError> {
        let write_err = |source: std::io::Error| LedgerFileError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, encode_ledger(ledger)).map_err(write_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(write_err)?;

        tracing::debug!(
            path = %self.path.display(),
            keys = ledger.len(),
            "Requirement file saved atomically"
        );

        Ok(())
    }
}
