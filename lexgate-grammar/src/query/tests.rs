// lexgate-grammar/src/query/tests.rs
// ============================================================================
// Module: Query Compiler Unit Tests
// Description: Unit tests for FTS expression compilation.
// Purpose: Validate prefix terms, quoting, and fallback behavior.
// Dependencies: lexgate-grammar
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use super::compile_fts_query;

#[test]
fn empty_input_compiles_to_empty_primary() {
    let compiled = compile_fts_query("");
    assert_eq!(compiled.primary, "");
    assert!(compiled.fallback.is_none());

    let compiled = compile_fts_query("   ");
    assert_eq!(compiled.primary, "");
    assert!(compiled.fallback.is_none());
}

#[test]
fn single_token_has_no_fallback() {
    let compiled = compile_fts_query("Datenschutz");
    assert_eq!(compiled.primary, "Datenschutz*");
    assert!(compiled.fallback.is_none());
}

#[test]
fn multi_token_input_gets_an_or_fallback() {
    let compiled = compile_fts_query("Schadensersatz Verletzung");
    assert_eq!(compiled.primary, "Schadensersatz* AND Verletzung*");
    assert_eq!(
        compiled.fallback.as_deref(),
        Some("Schadensersatz* OR Verletzung*")
    );
}

#[test]
fn double_quotes_are_stripped() {
    let compiled = compile_fts_query("\"Datenschutz\" Recht");
    assert_eq!(compiled.primary, "Datenschutz* AND Recht*");
    assert_eq!(compiled.primary.matches('"').count(), 0);
}

#[test]
fn operator_characters_are_quoted_literals() {
    let compiled = compile_fts_query("§ 1 BDSG");
    assert_eq!(compiled.primary, "\"§\"* AND 1* AND BDSG*");
    let quotes = compiled.primary.matches('"').count();
    assert_eq!(quotes % 2, 0, "unmatched quote in {}", compiled.primary);

    let compiled = compile_fts_query("art-13 (EU)");
    assert_eq!(compiled.primary, "\"art-13\"* AND \"(EU)\"*");
}

#[test]
fn compilation_is_deterministic() {
    let first = compile_fts_query("Daten schutz:recht");
    let second = compile_fts_query("Daten schutz:recht");
    assert_eq!(first, second);
}
