// lexgate-core/src/envelope.rs
// ============================================================================
// Module: Result Envelope
// Description: Uniform tool-call result envelope and error codes.
// Purpose: Give every tool call one success or one structured failure.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every tool call produces exactly one [`ToolResult`]: `{tool, ok, data}`
//! on success or `{tool, ok, error}` on failure. Error codes form a small
//! closed set so callers can branch without parsing messages.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Closed set of user-visible error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorCode {
    /// Argument missing, wrong type, bad enum, or empty required string.
    InvalidArguments,
    /// No adapter registered for the requested code.
    UnknownCountry,
    /// Two adapters registered under the same normalized code.
    DuplicateCountry,
    /// Adapter's static contract does not include the operation.
    UnsupportedCapability,
    /// Tool name not in the recognized set.
    UnknownTool,
    /// Malformed JSON at the transport layer.
    InvalidJson,
    /// Catch-all for unexpected failures.
    InternalError,
}

impl ToolErrorCode {
    /// Returns the stable serialized label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArguments => "invalid_arguments",
            Self::UnknownCountry => "unknown_country",
            Self::DuplicateCountry => "duplicate_country",
            Self::UnsupportedCapability => "unsupported_capability",
            Self::UnknownTool => "unknown_tool",
            Self::InvalidJson => "invalid_json",
            Self::InternalError => "internal_error",
        }
    }
}

/// Structured failure payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    /// Stable error code.
    pub code: ToolErrorCode,
    /// Human-readable message naming the offending input where possible.
    pub message: String,
    /// Optional structured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ToolFailure {
    /// Creates a failure without details.
    #[must_use]
    pub fn new(code: ToolErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Uniform tool-call result envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name the envelope answers.
    pub tool: String,
    /// True when `data` is present, false when `error` is present.
    pub ok: bool,
    /// Success payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolFailure>,
}

impl ToolResult {
    /// Wraps a success payload.
    #[must_use]
    pub fn success(tool: impl Into<String>, data: Value) -> Self {
        Self {
            tool: tool.into(),
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps a structured failure.
    #[must_use]
    pub fn failure(tool: impl Into<String>, failure: ToolFailure) -> Self {
        Self {
            tool: tool.into(),
            ok: false,
            data: None,
            error: Some(failure),
        }
    }
}
