// crates/olympus-config/src/lib.rs
// ============================================================================
// Module: OLYMPUS Config
// Description: Canonical configuration model and fail-closed loading for
// per-deployment data: ledger root, a project's temporal contract, and
// logging verbosity.
// Purpose: Single source of truth for `olympus.toml` semantics.
// Dependencies: olympus-core, serde, toml, thiserror
// ============================================================================

//! ## Overview
//! §6: configuration covers only per-deployment wiring — the ledger root
//! directory, a project's [`olympus_core::TemporalContract`] declaration,
//! and a logging directive string. The compile-time invariant laws (tier
//! minimums, entropy weights, phase boundaries) are never loadable here;
//! they remain Rust `const` tables in `olympus-core` and `olympus-gates`.
//!
//! Config inputs are untrusted. Loading applies the same fail-closed guards
//! the ledger and proof layers apply to their own inputs: bounded path
//! length, bounded path component length, bounded file size, and mandatory
//! UTF-8 encoding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use olympus_core::TemporalContract;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "olympus.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "OLYMPUS_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default ledger root directory when none is declared.
const DEFAULT_LEDGER_ROOT: &str = "./olympus-ledgers";
/// Default `tracing_subscriber::EnvFilter` directive.
const DEFAULT_LOG_DIRECTIVE: &str = "info";

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// OLYMPUS deployment configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OlympusConfig {
    /// Directory holding all named ledger files (§4 ledger list).
    #[serde(default = "default_ledger_root")]
    pub ledger_root: PathBuf,
    /// The governed project's temporal contract, if declared up front.
    /// Runs without a declared contract still execute; TSL treats an
    /// absent contract as an immediate block (§4.9).
    #[serde(default)]
    pub contract: Option<TemporalContract>,
    /// `tracing_subscriber::EnvFilter` directive string.
    #[serde(default = "default_log_directive")]
    pub log_directive: String,
}

fn default_ledger_root() -> PathBuf {
    PathBuf::from(DEFAULT_LEDGER_ROOT)
}

fn default_log_directive() -> String {
    DEFAULT_LOG_DIRECTIVE.to_string()
}

impl OlympusConfig {
    /// Loads configuration from disk using the default resolution rules:
    /// an explicit `path`, then `OLYMPUS_CONFIG`, then `olympus.toml` in
    /// the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when resolution, reading, parsing, or
    /// validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self = toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the ledger root or contract bounds are
    /// invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("ledger_root", &self.ledger_root.to_string_lossy())?;
        if let Some(contract) = &self.contract {
            if contract.intended_lifespan == 0 {
                return Err(ConfigError::Invalid("contract.intended_lifespan must be positive".to_string()));
            }
            if !contract.max_entropy_drift.is_finite() || contract.max_entropy_drift < 0.0 {
                return Err(ConfigError::Invalid(
                    "contract.max_entropy_drift must be a non-negative finite value".to_string(),
                ));
            }
            if !contract.baseline_entropy.is_finite() || contract.baseline_entropy < 0.0 {
                return Err(ConfigError::Invalid(
                    "contract.baseline_entropy must be a non-negative finite value".to_string(),
                ));
            }
        }
        if self.log_directive.trim().is_empty() {
            return Err(ConfigError::Invalid("log_directive must be non-empty".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path-shaped string field against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
