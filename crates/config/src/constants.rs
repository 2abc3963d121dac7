//! Centralized constants for the envreq workspace.
//!
//! This module contains names shared between the library and the
//! inspection CLI to avoid string duplication.

// =============================================================================
// Requirement File
// =============================================================================

/// Environment variable that overrides the requirement file path.
pub const REQFILE_ENV_VAR: &str = "ENVREQ_FILE";

/// Default requirement file name, relative to the working directory.
///
/// The file is deliberately a working-directory artifact (it describes the
/// binary that wrote it and is consumed by deployment tooling next to that
/// binary), not platform config-directory state.
pub const DEFAULT_REQFILE_NAME: &str = "env.req";

// =============================================================================
// Dotenv
// =============================================================================

/// Environment variable that disables `.env` loading when set to "true" or "1".
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
