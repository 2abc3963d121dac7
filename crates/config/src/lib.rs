//! Configuration access and requirement tracking for envreq.
//!
//! This crate resolves configuration values from the process environment
//! and records every key (and default) the application has ever requested
//! into a persisted requirement file, so deployment tooling can learn what
//! configuration a binary needs without running it.

pub mod constants;
mod env;
mod error;
pub mod ledger;
mod resolver;
mod tracker;

pub use env::{env_var_or_none, load_dotenv};
pub use error::ConfigError;
pub use ledger::{Ledger, LedgerFileError, LedgerStore};
pub use resolver::Resolver;
