// lexgate-grammar/src/nordic.rs
// ============================================================================
// Module: Nordic Citation Grammars
// Description: Regex grammars for Swedish SFS and Norwegian LOV citations.
// Purpose: Demonstrate the grammar interface for statute-level citations.
// Dependencies: lexgate-core, regex
// ============================================================================

//! ## Overview
//! Swedish citations use the `SFS YYYY:N` gazette form and Norwegian
//! citations the `LOV-YYYY-MM-DD-N` form. Both are statute-level: there is
//! no subdivision tail, so the default `format` rendering applies and the
//! single lookup form equals the normalized citation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::OnceLock;

use lexgate_core::CitationKind;
use lexgate_core::ParsedCitation;
use regex::Regex;

use crate::CitationGrammar;

// ============================================================================
// SECTION: Swedish Grammar
// ============================================================================

/// Swedish `SFS YYYY:N` citation pattern.
const SFS_PATTERN: &str = r"(?i)^sfs\s*([0-9]{4}):([0-9]+)$";

fn sfs_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SFS_PATTERN).expect("sfs pattern compiles"))
}

/// Swedish statute citation grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwedishGrammar;

impl SwedishGrammar {
    /// Creates the grammar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CitationGrammar for SwedishGrammar {
    fn parse(&self, input: &str) -> Option<ParsedCitation> {
        let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
        let captures = sfs_re().captures(&collapsed)?;
        let year = captures.get(1)?.as_str();
        let number = captures.get(2)?.as_str().trim_start_matches('0');
        if number.is_empty() {
            return None;
        }
        let normalized = format!("SFS {year}:{number}");
        let mut parsed = BTreeMap::new();
        parsed.insert("marker".to_string(), "SFS".to_string());
        parsed.insert("section".to_string(), format!("{year}:{number}"));
        parsed.insert("code".to_string(), "SFS".to_string());
        Some(ParsedCitation {
            kind: CitationKind::Paragraph,
            normalized: normalized.clone(),
            parsed,
            lookup_citations: vec![normalized],
        })
    }
}

// ============================================================================
// SECTION: Norwegian Grammar
// ============================================================================

/// Norwegian `LOV-YYYY-MM-DD-N` citation pattern.
const LOV_PATTERN: &str = r"(?i)^lov-([0-9]{4})-([0-9]{2})-([0-9]{2})-([0-9]+)$";

fn lov_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LOV_PATTERN).expect("lov pattern compiles"))
}

/// Norwegian statute citation grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct NorwegianGrammar;

impl NorwegianGrammar {
    /// Creates the grammar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CitationGrammar for NorwegianGrammar {
    fn parse(&self, input: &str) -> Option<ParsedCitation> {
        let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
        let captures = lov_re().captures(&collapsed)?;
        let year = captures.get(1)?.as_str();
        let month = captures.get(2)?.as_str();
        let day = captures.get(3)?.as_str();
        let number = captures.get(4)?.as_str();
        let normalized = format!("LOV-{year}-{month}-{day}-{number}");
        let mut parsed = BTreeMap::new();
        parsed.insert("marker".to_string(), "LOV".to_string());
        parsed.insert("section".to_string(), format!("{year}-{month}-{day}-{number}"));
        parsed.insert("code".to_string(), "LOV".to_string());
        Some(ParsedCitation {
            kind: CitationKind::Paragraph,
            normalized: normalized.clone(),
            parsed,
            lookup_citations: vec![normalized],
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
