// lexgate-core/src/document.rs
// ============================================================================
// Module: Document Model
// Description: The atomic retrieval unit and its metadata mapping.
// Purpose: Provide a stable, serialization-ready document record.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Document`] is the atomic unit of retrieval. Documents are immutable
//! within a corpus snapshot and refer to other documents only by string
//! identifiers inside `metadata`, never by embedded pointer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Document Kind
// ============================================================================

/// Closed set of document kinds.
///
/// # Invariants
/// - Serialized labels are stable (`snake_case`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A statute or a statute provision.
    Statute,
    /// A regulation or a regulation provision.
    Regulation,
    /// A court decision.
    Case,
    /// A legislative preparatory work (bill, committee report).
    PreparatoryWork,
    /// Anything else the corpus carries.
    Other,
}

impl DocumentKind {
    /// Returns the stable serialized label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Statute => "statute",
            Self::Regulation => "regulation",
            Self::Case => "case",
            Self::PreparatoryWork => "preparatory_work",
            Self::Other => "other",
        }
    }

    /// Parses a stored kind label, mapping unknown labels to [`Self::Other`].
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            "statute" => Self::Statute,
            "regulation" => Self::Regulation,
            "case" => Self::Case,
            "preparatory_work" => Self::PreparatoryWork,
            _ => Self::Other,
        }
    }
}

// ============================================================================
// SECTION: Metadata
// ============================================================================

/// Free-form scalar metadata attached to a document.
///
/// Values are JSON scalars only; nested structures are dropped at the
/// mapping boundary by [`scalar_metadata`].
pub type Metadata = BTreeMap<String, Value>;

/// Filters a JSON object down to its scalar entries.
///
/// Nested arrays and objects are dropped so that `metadata` never carries
/// structure, keeping the document record flat and cheap to scan.
#[must_use]
pub fn scalar_metadata(value: Value) -> Metadata {
    let Value::Object(entries) = value else {
        return Metadata::new();
    };
    entries
        .into_iter()
        .filter(|(_, value)| {
            matches!(value, Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))
        })
        .collect()
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// The atomic retrieval unit.
///
/// # Invariants
/// - `id` is non-empty and unique within the store.
/// - `kind` is drawn from the closed [`DocumentKind`] set.
/// - `effective_date`, when present, is an ISO `YYYY-MM-DD` string.
/// - `metadata` contains scalar values only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable string key, unique within the store.
    pub id: String,
    /// ISO-style lowercase jurisdiction code.
    pub jurisdiction: String,
    /// Document kind from the closed set.
    pub kind: DocumentKind,
    /// Human-readable title.
    pub title: String,
    /// Canonical citation when the corpus carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    /// Source URL when the corpus carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Effective date as ISO `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    /// Searchable text excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_snippet: Option<String>,
    /// Scalar metadata bag.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

impl Document {
    /// Assembles the searchable text of the document.
    ///
    /// Concatenates title, citation, snippet, and metadata values with
    /// collapsed whitespace. This is the input surface for the EU
    /// reference extractor.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<String> = vec![self.title.clone()];
        if let Some(citation) = &self.citation {
            parts.push(citation.clone());
        }
        if let Some(snippet) = &self.text_snippet {
            parts.push(snippet.clone());
        }
        for value in self.metadata.values() {
            match value {
                Value::String(text) => parts.push(text.clone()),
                Value::Number(number) => parts.push(number.to_string()),
                _ => {}
            }
        }
        parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
