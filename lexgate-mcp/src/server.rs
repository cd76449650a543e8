// lexgate-mcp/src/server.rs
// ============================================================================
// Module: Stdio Server Edge
// Description: Line-delimited stdio framing around the tool router.
// Purpose: Consume one JSON tool call per line, emit one envelope per line.
// Dependencies: lexgate-core, lexgate-store-sqlite
// ============================================================================

//! ## Overview
//! The transport edge is deliberately thin: the router consumes one tool
//! call and produces one envelope; this module only frames them. Malformed
//! or oversize lines produce an `invalid_json` envelope instead of
//! terminating the loop. Output lines are written and flushed whole, so
//! concurrent drivers never observe interleaved envelopes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::BufRead;
use std::io::Write;
use std::sync::Arc;

use lexgate_core::AdapterRegistry;
use lexgate_core::RegistryError;
use lexgate_core::ToolErrorCode;
use lexgate_core::ToolFailure;
use lexgate_core::ToolResult;
use lexgate_store_sqlite::CorpusStore;
use lexgate_store_sqlite::StoreConfig;
use lexgate_store_sqlite::StoreError;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::germany::GermanyAdapter;
use crate::ingestion::IngestionRunner;
use crate::nordics::NorwayAdapter;
use crate::nordics::SwedenAdapter;
use crate::tools::ToolCall;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Server startup or transport failure.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The corpus store failed to open.
    #[error("store init failed: {0}")]
    Store(#[from] StoreError),
    /// Adapter registration failed.
    #[error("registry init failed: {0}")]
    Registry(#[from] RegistryError),
    /// Stdio transport failed.
    #[error("transport failed: {0}")]
    Transport(#[from] io::Error),
}

// ============================================================================
// SECTION: Registry Construction
// ============================================================================

/// Builds the static adapter registry from configuration.
///
/// # Errors
///
/// Returns [`ServeError`] when the store cannot be opened or an adapter
/// registers twice.
pub fn build_registry(config: &ServerConfig) -> Result<AdapterRegistry, ServeError> {
    let store = CorpusStore::open(StoreConfig {
        path: config.database.path.clone(),
        jurisdiction: "de".to_string(),
    })?;
    let ingestion = IngestionRunner::from_config(&config.ingestion);

    let mut registry = AdapterRegistry::new();
    registry.register(Arc::new(GermanyAdapter::new(store, ingestion)))?;
    registry.register(Arc::new(SwedenAdapter::new()))?;
    registry.register(Arc::new(NorwayAdapter::new()))?;
    Ok(registry)
}

// ============================================================================
// SECTION: Stdio Transport
// ============================================================================

/// Serves tool calls over line-delimited stdio until EOF.
///
/// # Errors
///
/// Returns [`ServeError`] when reading or writing the streams fails.
pub fn serve_stdio(router: &ToolRouter, max_line_bytes: usize) -> Result<(), ServeError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    let mut line = String::new();
    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }
        let envelope = frame_response(&line, max_line_bytes, |call| router.handle_tool_call(call));
        let payload = serde_json::to_string(&envelope)
            .unwrap_or_else(|_| String::from("{\"tool\":\"unknown\",\"ok\":false}"));
        writeln!(writer, "{payload}")?;
        writer.flush()?;
    }
}

/// Parses one request line and produces one envelope.
fn frame_response(
    line: &str,
    max_line_bytes: usize,
    handle: impl FnOnce(&ToolCall) -> ToolResult,
) -> ToolResult {
    if line.len() > max_line_bytes {
        return invalid_json_envelope("request line exceeds the configured size limit");
    }
    match serde_json::from_str::<ToolCall>(line.trim()) {
        Ok(call) => handle(&call),
        Err(err) => invalid_json_envelope(&format!("malformed tool call: {err}")),
    }
}

/// Envelope for transport-level JSON failures.
fn invalid_json_envelope(message: &str) -> ToolResult {
    ToolResult::failure(
        "unknown",
        ToolFailure::new(ToolErrorCode::InvalidJson, message),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
