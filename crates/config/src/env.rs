//! Environment variable access for configuration lookups.
//!
//! Responsibilities:
//! - Read environment variables with empty-means-absent filtering.
//! - Load `.env` files into the process environment, behind the
//!   `DOTENV_DISABLED` gate.
//!
//! Does NOT handle:
//! - Requirement bookkeeping (see `ledger`).
//! - Missing-key tracking (see `tracker`).
//!
//! Invariants:
//! - A variable that is unset or set to the empty string is treated as
//!   absent; the two cases are indistinguishable to callers.
//! - Present values are returned verbatim (no trimming).
//! - Dotenv errors never carry raw `.env` line contents.

use crate::constants::DOTENV_DISABLED_VAR;
use crate::error::ConfigError;

/// Read an environment variable, returning `None` if unset or empty.
///
/// An empty value counts as absent: the environment is the only source of
/// configuration values, and an empty entry carries no value to resolve.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Load environment variables from a `.env` file if present.
///
/// If the `DOTENV_DISABLED` environment variable is set to "true" or "1",
/// the `.env` file will not be loaded (useful for testing). Missing
/// `.env` files are silently ignored.
///
/// SAFETY: Error messages never include raw .env line contents to
/// prevent secret leakage.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}
