// lexgate-mcp/src/config.rs
// ============================================================================
// Module: Server Configuration
// Description: TOML-backed configuration with cross-field validation.
// Purpose: Describe corpus location, audit routing, and ingestion.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is deserialized from TOML and validated before any
//! subsystem is built. Every section has defaults so an empty file is a
//! working local setup: corpus at `data/corpus.db`, audit to stderr, no
//! ingestion commands.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config read failed: {path}: {reason}")]
    Read {
        /// Path to the config file.
        path: String,
        /// Error details.
        reason: String,
    },
    /// Config file could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// Cross-field validation failed.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Corpus database location.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the corpus database file.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/corpus.db")
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditMode {
    /// JSON lines to stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// No audit output.
    None,
}

/// Audit configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub mode: AuditMode,
    /// Log file path; required for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Stdio framing limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Largest accepted request line in bytes.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

fn default_max_line_bytes() -> usize {
    1024 * 1024
}

/// External ingestion command table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestionConfig {
    /// Command argv per source id.
    #[serde(default)]
    pub commands: BTreeMap<String, Vec<String>>,
    /// Sub-process deadline in seconds.
    #[serde(default = "default_ingestion_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            commands: BTreeMap::new(),
            timeout_secs: default_ingestion_timeout_secs(),
        }
    }
}

fn default_ingestion_timeout_secs() -> u64 {
    300
}

// ============================================================================
// SECTION: Server Config
// ============================================================================

/// Top-level server configuration.
///
/// # Invariants
/// - `validate` has been called before subsystems are built from it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Corpus database location.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Audit sink routing.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Stdio framing limits.
    #[serde(default)]
    pub transport: TransportConfig,
    /// External ingestion commands.
    #[serde(default)]
    pub ingestion: IngestionConfig,
}

impl ServerConfig {
    /// Loads and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let config: Self =
            toml::from_str(&raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.audit.mode == AuditMode::File && self.audit.path.is_none() {
            return Err(ConfigError::Invalid("audit.path required for file mode".to_string()));
        }
        if self.transport.max_line_bytes < 1024 {
            return Err(ConfigError::Invalid(
                "transport.max_line_bytes must be at least 1024".to_string(),
            ));
        }
        if self.ingestion.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "ingestion.timeout_secs must be greater than zero".to_string(),
            ));
        }
        for (source_id, argv) in &self.ingestion.commands {
            if argv.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "ingestion.commands.{source_id} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
