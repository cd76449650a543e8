// lexgate-mcp/src/seed/tests.rs
// ============================================================================
// Module: Seed Corpus Unit Tests
// Description: Unit tests for seed search behavior.
// Purpose: Validate the miniature tier order over the embedded set.
// Dependencies: lexgate-mcp, lexgate-grammar
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use lexgate_grammar::GermanGrammar;

use super::find_seed_document;
use super::german_seed_documents;
use super::search_seed_documents;

#[test]
fn citation_query_hits_the_exact_seed_first() {
    let seeds = german_seed_documents();
    let grammar = GermanGrammar::new();
    let results = search_seed_documents(&seeds, "§ 823 BGB", 5, &grammar);
    assert!(!results.is_empty());
    assert_eq!(results[0].id, "bgb:823");
}

#[test]
fn substring_query_matches_titles_and_snippets() {
    let seeds = german_seed_documents();
    let grammar = GermanGrammar::new();
    let results = search_seed_documents(&seeds, "Menschenwürde", 5, &grammar);
    assert!(results.iter().any(|document| document.id == "gg:art-1"));
}

#[test]
fn results_respect_the_limit_and_are_unique() {
    let seeds = german_seed_documents();
    let grammar = GermanGrammar::new();
    let results = search_seed_documents(&seeds, "bdsg", 1, &grammar);
    assert_eq!(results.len(), 1);
}

#[test]
fn unmatched_query_returns_nothing() {
    let seeds = german_seed_documents();
    let grammar = GermanGrammar::new();
    assert!(search_seed_documents(&seeds, "Mietrecht", 5, &grammar).is_empty());
}

#[test]
fn seeds_resolve_by_id() {
    let seeds = german_seed_documents();
    assert!(find_seed_document(&seeds, "bdsg:1").is_some());
    assert!(find_seed_document(&seeds, "nope").is_none());
}
