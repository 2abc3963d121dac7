//! Error types for configuration resolution.
//!
//! Responsibilities:
//! - Define error variants for lookup, validation, persistence, and
//!   `.env` loading failures.
//! - Provide conversion from the lower-level `LedgerFileError`.
//!
//! Invariants:
//! - Lookup and validation messages keep the exact wording external
//!   tooling matches on (`Missing config. Key ...`, `Missing keys [...]`).
//! - Dotenv errors NEVER include raw .env line contents to prevent secret
//!   leakage.

use std::io::ErrorKind;
use thiserror::Error;

use crate::ledger::LedgerFileError;

/// Errors that can occur while resolving or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required lookup found no value for the key.
    #[error("Missing config. Key {0} not found.")]
    NotFound(String),

    /// One or more required keys were absent at lookup time.
    ///
    /// Keys are listed in the order they were first found missing.
    #[error("Missing keys {keys:?}")]
    MissingKeys { keys: Vec<String> },

    /// The requirement ledger could not be read, parsed, or rewritten.
    #[error(transparent)]
    Persistence(#[from] LedgerFileError),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from the dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
