//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that deployment scripts can use to
//!   distinguish failure modes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 2 is reserved for the missing-required-keys outcome so
//!   pipelines can separate "bad invocation" from "incomplete config".

/// Structured exit codes for envreq-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed and no required key is missing.
    Success = 0,

    /// General error - unreadable or malformed requirement file, bad flags.
    GeneralError = 1,

    /// One or more required keys are absent from the environment.
    ///
    /// Scripts should supply the listed keys and re-run the check.
    MissingKeys = 2,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}
