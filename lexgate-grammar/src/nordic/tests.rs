// lexgate-grammar/src/nordic/tests.rs
// ============================================================================
// Module: Nordic Grammar Unit Tests
// Description: Unit tests for the SFS and LOV regex grammars.
// Purpose: Validate normalization and rejection behavior.
// Dependencies: lexgate-grammar, lexgate-core
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use crate::CitationGrammar;

use super::NorwegianGrammar;
use super::SwedishGrammar;

#[test]
fn sfs_citation_normalizes_case_and_zeros() {
    let grammar = SwedishGrammar::new();
    let citation = grammar.parse("sfs 2018:0218").expect("parse");
    assert_eq!(citation.normalized, "SFS 2018:218");
    assert_eq!(citation.lookup_citations, vec!["SFS 2018:218".to_string()]);
}

#[test]
fn sfs_rejects_non_gazette_input() {
    let grammar = SwedishGrammar::new();
    assert!(grammar.parse("SFS 18:2").is_none());
    assert!(grammar.parse("2018:218").is_none());
    assert!(grammar.parse("").is_none());
}

#[test]
fn lov_citation_normalizes_case() {
    let grammar = NorwegianGrammar::new();
    let citation = grammar.parse("lov-1999-07-16-69").expect("parse");
    assert_eq!(citation.normalized, "LOV-1999-07-16-69");
    assert_eq!(citation.component("section"), Some("1999-07-16-69"));
}

#[test]
fn lov_rejects_malformed_dates() {
    let grammar = NorwegianGrammar::new();
    assert!(grammar.parse("LOV-1999-7-16-69").is_none());
    assert!(grammar.parse("LOV-1999-07-16").is_none());
}

#[test]
fn nordic_normalization_is_idempotent() {
    let swedish = SwedishGrammar::new();
    let first = swedish.parse("SFS 2018:218").expect("parse");
    assert_eq!(swedish.parse(&first.normalized).expect("reparse"), first);

    let norwegian = NorwegianGrammar::new();
    let first = norwegian.parse("LOV-1999-07-16-69").expect("parse");
    assert_eq!(norwegian.parse(&first.normalized).expect("reparse"), first);
}
