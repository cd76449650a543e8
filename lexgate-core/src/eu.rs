// lexgate-core/src/eu.rs
// ============================================================================
// Module: EU Cross-Reference Model
// Description: Normalized references to EU legal acts.
// Purpose: Carry extracted EU identifiers with provenance and confidence.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`EuReference`] records one normalized reference from a national
//! document to an EU act, with the source document's provenance and a
//! detector confidence. Extraction and matching live in `lexgate-eu`;
//! this module only defines the shared record.

use serde::Deserialize;
use serde::Serialize;

use crate::document::DocumentKind;

/// EU act type derived from the detected identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EuActType {
    /// A directive (CELEX sector letter `L`).
    Directive,
    /// A regulation (CELEX sector letter `R`).
    Regulation,
    /// A decision (CELEX sector letter `D`).
    Decision,
    /// An act whose type the detector could not determine.
    Act,
}

impl EuActType {
    /// Returns the stable serialized label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directive => "directive",
            Self::Regulation => "regulation",
            Self::Decision => "decision",
            Self::Act => "act",
        }
    }
}

/// One extracted cross-reference to an EU act.
///
/// # Invariants
/// - `eu_id` is fully normalized (`<JUR> <year>/<number>`, no leading
///   zeros in the number part).
/// - `confidence` lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EuReference {
    /// Normalized EU identifier.
    pub eu_id: String,
    /// Detected act type.
    pub eu_type: EuActType,
    /// Kind of the source document.
    pub source_kind: DocumentKind,
    /// Identifier of the source document.
    pub source_id: String,
    /// Statute identifier of the source document when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_statute_id: Option<String>,
    /// Citation of the source document when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_citation: Option<String>,
    /// Title of the source document when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_title: Option<String>,
    /// URL of the source document when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Text around the match, ±90 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_snippet: Option<String>,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
}
