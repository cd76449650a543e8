// lexgate-core/src/citation.rs
// ============================================================================
// Module: Parsed Citation Record
// Description: Structured outcome of jurisdictional citation parsing.
// Purpose: Carry normalized citations and their exact-match lookup forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ParsedCitation`] is the structured outcome of grammar parsing: a
//! discriminator, the canonical normalized string, a string-keyed component
//! bag, and the ordered lookup forms used for exact-match retrieval.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Top-level citation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationKind {
    /// Section-marker citation (`§` / `§§`).
    Paragraph,
    /// Article citation (`Art.` / `Artikel`).
    Article,
}

/// Structured outcome of citation parsing.
///
/// # Invariants
/// - `normalized` is the canonical rendering; re-parsing it yields an
///   equal record.
/// - `lookup_citations` is non-empty and ordered with the preferred
///   candidate first; entries are matched lower-cased against the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCitation {
    /// Shape discriminator.
    #[serde(rename = "type")]
    pub kind: CitationKind,
    /// Canonical normalized citation string.
    pub normalized: String,
    /// Component bag (`marker`, `section`, `paragraph`, `sentence`,
    /// `number`, `letter`, `article`, `code`).
    pub parsed: BTreeMap<String, String>,
    /// Ordered minimal lookup forms for exact-match joins.
    pub lookup_citations: Vec<String>,
}

impl ParsedCitation {
    /// Returns a parsed component by key.
    #[must_use]
    pub fn component(&self, key: &str) -> Option<&str> {
        self.parsed.get(key).map(String::as_str)
    }

    /// Returns the preferred lookup citation.
    #[must_use]
    pub fn preferred_lookup(&self) -> Option<&str> {
        self.lookup_citations.first().map(String::as_str)
    }

    /// Returns the code abbreviation when the grammar captured one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.component("code")
    }
}
