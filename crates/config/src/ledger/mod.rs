//! Requirement ledger types and persistence.
//!
//! Responsibilities:
//! - Define the in-memory `Ledger` (key -> distinct defaults ever requested).
//! - Encode and decode the line-oriented requirement file (see `format`).
//! - Read-merge-write the persisted file atomically (see `store`).
//!
//! Does NOT handle:
//! - Environment lookups (see `env`).
//! - Missing-key tracking or validation (see `tracker`, `resolver`).
//!
//! Invariants:
//! - A key's default list never contains the same value twice; insertion
//!   order is first-seen order.
//! - An empty-string default means "requested without a default (required)".
//! - The ledger only grows: merging is a union, repeated identical records
//!   are idempotent.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

mod format;
mod store;

pub use store::LedgerStore;

pub(crate) use format::{encode_ledger, parse_ledger};

/// Marker default recorded by required lookups (no default supplied).
pub const NO_DEFAULT: &str = "";

/// Every (key, default) pair the application has ever requested.
///
/// Keys map to the distinct default values supplied across all call sites,
/// in first-seen order. Keys and values must not contain `=`, `,`, or
/// newlines; the line format defines no escaping for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: BTreeMap<String, Vec<String>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `key` was requested with `default`.
    ///
    /// Duplicate defaults for the same key are dropped; the empty string
    /// dedups like any other value.
    pub fn record(&mut self, key: &str, default: &str) {
        let defaults = self.entries.entry(key.to_string()).or_default();
        if !defaults.iter().any(|d| d == default) {
            defaults.push(default.to_string());
        }
    }

    /// Merge every entry of `other` into this ledger.
    pub fn merge(&mut self, other: &Ledger) {
        for (key, defaults) in other.iter() {
            for default in defaults {
                self.record(key, default);
            }
        }
    }

    /// The distinct defaults recorded for `key`, in first-seen order.
    pub fn defaults(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Whether `key` has been recorded at all.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether `key` was ever requested without a default.
    pub fn is_required(&self, key: &str) -> bool {
        self.defaults(key)
            .is_some_and(|ds| ds.iter().any(|d| d == NO_DEFAULT))
    }

    /// Keys that were ever requested without a default, in sorted order.
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, ds)| ds.iter().any(|d| d == NO_DEFAULT))
            .map(|(k, _)| k.as_str())
    }

    /// Iterate over all entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, ds)| (k.as_str(), ds.as_slice()))
    }

    /// Number of recorded keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Errors that can occur when reading or rewriting the requirement file.
#[derive(Debug, thiserror::Error)]
pub enum LedgerFileError {
    #[error("Failed to read requirement file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse requirement file at {path}: line {line} is not `key=default,...`")]
    Parse { path: PathBuf, line: usize },

    #[error("Failed to write requirement file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
