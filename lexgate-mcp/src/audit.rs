// lexgate-mcp/src/audit.rs
// ============================================================================
// Module: Tool-Call Audit Logging
// Description: Structured audit events for tool-call handling.
// Purpose: Emit JSON-line audit records without hard dependencies.
// Dependencies: lexgate-core, serde, time
// ============================================================================

//! ## Overview
//! One audit event per tool call: tool, country, outcome, and duration.
//! Sinks are intentionally lightweight so deployments can route events to
//! their preferred logging pipeline without redesign.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Event
// ============================================================================

/// Audit event payload for one tool call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// RFC 3339 event timestamp.
    pub timestamp: String,
    /// Tool name as received.
    pub tool: String,
    /// Jurisdiction code when the call carried one.
    pub country: Option<String>,
    /// Whether the envelope reported success.
    pub ok: bool,
    /// Stable error code for failures.
    pub error_code: Option<&'static str>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u128,
}

impl ToolAuditEvent {
    /// Creates an audit event stamped with the current time.
    #[must_use]
    pub fn new(
        tool: String,
        country: Option<String>,
        ok: bool,
        error_code: Option<&'static str>,
        duration_ms: u128,
    ) -> Self {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"));
        Self {
            event: "tool_call",
            timestamp,
            tool,
            country,
            ok,
            error_code,
            duration_ms,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for tool-call events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ToolAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &ToolAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &ToolAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &ToolAuditEvent) {}
}
