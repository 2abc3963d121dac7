//! Configuration resolution against the process environment.
//!
//! Responsibilities:
//! - Answer "what is the value of key K" with or without a default.
//! - Record every requested (key, default) pair into the requirement
//!   ledger as a side effect of each lookup.
//! - Track required keys that were absent and gate startup on them.
//!
//! Does NOT handle:
//! - Serving the requirement file over HTTP; collaborators serve the path
//!   returned by `requirement_file()`.
//! - Cross-process write coordination (one writer process per file).
//!
//! Invariants:
//! - The requirement file path is fixed at construction.
//! - Ledger updates are full read-merge-write cycles serialized behind a
//!   single internal lock, so one `Resolver` is safe to share across
//!   threads.
//! - A lookup records its pair before returning, whether or not the key
//!   was present.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::constants::{DEFAULT_REQFILE_NAME, REQFILE_ENV_VAR};
use crate::env::env_var_or_none;
use crate::error::ConfigError;
use crate::ledger::{Ledger, LedgerStore, NO_DEFAULT};
use crate::tracker::MissingKeyTracker;

/// Resolves configuration values from the environment and records every
/// requested key into the persisted requirement ledger.
///
/// One resolver per requirement file; construct it once at startup and
/// share it (it is `Send + Sync`).
#[derive(Debug)]
pub struct Resolver {
    store: LedgerStore,
    /// Serializes the read-merge-write cycle against the requirement file.
    write_lock: Mutex<()>,
    missing: Mutex<MissingKeyTracker>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Create a resolver using the `ENVREQ_FILE` environment variable as
    /// the requirement file path, falling back to `env.req` in the
    /// working directory.
    pub fn new() -> Self {
        let path = env_var_or_none(REQFILE_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REQFILE_NAME));
        Self::with_path(path)
    }

    /// Create a resolver with an explicit requirement file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            store: LedgerStore::new(path),
            write_lock: Mutex::new(()),
            missing: Mutex::new(MissingKeyTracker::default()),
        }
    }

    /// Load environment variables from a `.env` file if present, so that
    /// subsequent lookups can resolve against them.
    ///
    /// Chainable; see [`crate::load_dotenv`] for the `DOTENV_DISABLED`
    /// gate and error semantics.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        crate::env::load_dotenv()?;
        Ok(self)
    }

    /// Look up a required key.
    ///
    /// Records `(key, "")` into the ledger whether or not the key is
    /// present. An absent key is flagged for `valid()`/`validate()` and
    /// returned as `ConfigError::NotFound`; once flagged, a key stays
    /// flagged for the remainder of the process.
    pub fn find(&self, key: &str) -> Result<String, ConfigError> {
        let value = env_var_or_none(key);
        self.record(key, NO_DEFAULT)?;

        match value {
            Some(v) => Ok(v),
            None => {
                self.missing
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .flag(key);
                Err(ConfigError::NotFound(key.to_string()))
            }
        }
    }

    /// Look up a key, substituting `default` when it is absent.
    ///
    /// Records `(key, default)` into the ledger on every call. Keys read
    /// through `get` are never treated as required, so this does not
    /// affect `valid()`. The only error source is a requirement-file
    /// persistence failure.
    pub fn get(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        let value = env_var_or_none(key);
        self.record(key, default)?;

        Ok(value.unwrap_or_else(|| default.to_string()))
    }

    /// Report whether every required key seen so far was present.
    ///
    /// Returns `ConfigError::MissingKeys` listing the absent keys in the
    /// order they were first found missing.
    pub fn valid(&self) -> Result<(), ConfigError> {
        let missing = self.missing.lock().unwrap_or_else(PoisonError::into_inner);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingKeys {
                keys: missing.keys().to_vec(),
            })
        }
    }

    /// Startup gate: terminate the process if any required key is missing.
    ///
    /// Prints the aggregated missing-keys message to stderr and exits with
    /// a non-zero status. This is the only process-exit-affecting call in
    /// the crate.
    pub fn validate(&self) {
        if let Err(e) = self.valid() {
            tracing::error!(error = %e, "required configuration is missing");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    /// Snapshot of the keys flagged missing so far, in first-seen order.
    pub fn missing_keys(&self) -> Vec<String> {
        self.missing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .to_vec()
    }

    /// Read the current persisted ledger.
    pub fn ledger(&self) -> Result<Ledger, ConfigError> {
        Ok(self.store.load()?)
    }

    /// The requirement file path, for external collaborators (e.g. an
    /// HTTP route serving the file to remote tooling).
    pub fn requirement_file(&self) -> &Path {
        self.store.path()
    }

    fn record(&self, key: &str, default: &str) -> Result<(), ConfigError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.store.record(key, default)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn resolver_in(dir: &tempfile::TempDir) -> Resolver {
        Resolver::with_path(dir.path().join("env.req"))
    }

    #[test]
    #[serial]
    fn test_find_present_returns_env_value() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(&dir);

        temp_env::with_vars([("_ENVREQ_TEST_PRESENT", Some("val"))], || {
            assert_eq!(resolver.find("_ENVREQ_TEST_PRESENT").unwrap(), "val");
        });
        assert!(resolver.missing_keys().is_empty());
    }

    #[test]
    #[serial]
    fn test_find_absent_returns_not_found_and_flags_key() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(&dir);

        let err = resolver.find("_ENVREQ_TEST_ABSENT").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing config. Key _ENVREQ_TEST_ABSENT not found."
        );
        assert_eq!(resolver.missing_keys(), vec!["_ENVREQ_TEST_ABSENT"]);
    }

    #[test]
    #[serial]
    fn test_find_records_empty_default_even_when_present() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(&dir);

        temp_env::with_vars([("_ENVREQ_TEST_RECORDED", Some("v"))], || {
            resolver.find("_ENVREQ_TEST_RECORDED").unwrap();
        });

        let ledger = resolver.ledger().unwrap();
        assert_eq!(
            ledger.defaults("_ENVREQ_TEST_RECORDED"),
            Some(&["".to_string()][..])
        );
        assert!(ledger.is_required("_ENVREQ_TEST_RECORDED"));
    }

    #[test]
    #[serial]
    fn test_get_substitutes_default_without_flagging() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(&dir);

        let value = resolver.get("_ENVREQ_TEST_DEFAULTED", "fallback").unwrap();
        assert_eq!(value, "fallback");
        assert!(resolver.missing_keys().is_empty());
        assert!(resolver.valid().is_ok());
    }

    #[test]
    #[serial]
    fn test_get_prefers_env_value_over_default() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(&dir);

        temp_env::with_vars([("_ENVREQ_TEST_SET", Some("from-env"))], || {
            assert_eq!(
                resolver.get("_ENVREQ_TEST_SET", "fallback").unwrap(),
                "from-env"
            );
        });
    }

    #[test]
    #[serial]
    fn test_valid_lists_missing_keys_in_first_seen_order() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(&dir);

        let _ = resolver.find("c");
        let _ = resolver.find("d");
        let _ = resolver.find("c");

        let err = resolver.valid().unwrap_err();
        assert_eq!(err.to_string(), r#"Missing keys ["c", "d"]"#);
    }

    #[test]
    #[serial]
    fn test_missing_key_stays_flagged_after_it_appears() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(&dir);

        let _ = resolver.find("_ENVREQ_TEST_LATE");
        temp_env::with_vars([("_ENVREQ_TEST_LATE", Some("now-set"))], || {
            assert_eq!(resolver.find("_ENVREQ_TEST_LATE").unwrap(), "now-set");
        });

        // Flagged at first lookup; never un-flagged within the process.
        assert_eq!(resolver.missing_keys(), vec!["_ENVREQ_TEST_LATE"]);
        assert!(resolver.valid().is_err());
    }

    #[test]
    #[serial]
    fn test_new_reads_reqfile_path_from_environment() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.req");

        temp_env::with_vars([(REQFILE_ENV_VAR, Some(path.to_str().unwrap()))], || {
            let resolver = Resolver::new();
            assert_eq!(resolver.requirement_file(), path.as_path());
        });
    }

    #[test]
    #[serial]
    fn test_new_defaults_to_working_directory_reqfile() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        temp_env::with_vars([(REQFILE_ENV_VAR, None::<&str>)], || {
            let resolver = Resolver::new();
            assert_eq!(
                resolver.requirement_file(),
                Path::new(DEFAULT_REQFILE_NAME)
            );
        });
    }

    #[test]
    #[serial]
    fn test_record_failure_surfaces_as_persistence_error() {
        let _guard = crate::test_util::global_test_lock().lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(&dir);
        std::fs::write(resolver.requirement_file(), "malformed line\n").unwrap();

        let err = resolver.get("_ENVREQ_TEST_KEY", "d").unwrap_err();
        assert!(matches!(err, ConfigError::Persistence(_)));
    }
}
