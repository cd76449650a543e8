// lexgate-mcp/src/server/tests.rs
// ============================================================================
// Module: Server Edge Unit Tests
// Description: Unit tests for framing and registry construction.
// Purpose: Validate transport-level failure envelopes.
// Dependencies: lexgate-mcp, lexgate-core, tempfile
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::sync::Arc;

use lexgate_core::ToolErrorCode;
use tempfile::TempDir;

use crate::audit::NoopAuditSink;
use crate::config::ServerConfig;
use crate::telemetry::NoopMetrics;
use crate::tools::ToolRouter;

use super::build_registry;
use super::frame_response;

fn router() -> ToolRouter {
    let dir = TempDir::new().expect("tempdir");
    let mut config = ServerConfig::default();
    config.database.path = dir.path().join("absent.db");
    let registry = build_registry(&config).expect("registry");
    ToolRouter::new(registry, Arc::new(NoopAuditSink), Arc::new(NoopMetrics))
}

#[test]
fn registry_carries_all_three_jurisdictions() {
    let dir = TempDir::new().expect("tempdir");
    let mut config = ServerConfig::default();
    config.database.path = dir.path().join("absent.db");
    let registry = build_registry(&config).expect("registry");
    assert!(registry.get("de").is_some());
    assert!(registry.get("SE").is_some());
    assert!(registry.get("no").is_some());
    assert_eq!(registry.len(), 3);
}

#[test]
fn well_formed_lines_are_routed() {
    let router = router();
    let envelope = frame_response(
        "{\"name\": \"list_countries\"}\n",
        1024 * 1024,
        |call| router.handle_tool_call(call),
    );
    assert!(envelope.ok);
    assert_eq!(envelope.tool, "list_countries");
}

#[test]
fn malformed_json_produces_an_invalid_json_envelope() {
    let router = router();
    let envelope =
        frame_response("{not json}\n", 1024 * 1024, |call| router.handle_tool_call(call));
    assert!(!envelope.ok);
    assert_eq!(envelope.error.expect("error").code, ToolErrorCode::InvalidJson);
}

#[test]
fn oversize_lines_are_rejected_without_parsing() {
    let router = router();
    let line = format!("{{\"name\": \"{}\"}}\n", "x".repeat(4096));
    let envelope = frame_response(&line, 1024, |call| router.handle_tool_call(call));
    assert!(!envelope.ok);
    let failure = envelope.error.expect("error");
    assert_eq!(failure.code, ToolErrorCode::InvalidJson);
    assert!(failure.message.contains("size limit"));
}
