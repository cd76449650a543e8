// lexgate-grammar/src/german/tests.rs
// ============================================================================
// Module: German Grammar Unit Tests
// Description: Unit tests for parsing, normalization, and formatting.
// Purpose: Validate the paragraph and article shapes end to end.
// Dependencies: lexgate-grammar, lexgate-core
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use lexgate_core::CitationKind;
use lexgate_core::CitationStyle;

use crate::CitationGrammar;

use super::GermanGrammar;

#[test]
fn parses_lowercase_paragraph_citation() {
    let grammar = GermanGrammar::new();
    let citation = grammar.parse("§ 823 abs. 1 bgb").expect("parse");
    assert_eq!(citation.kind, CitationKind::Paragraph);
    assert_eq!(citation.normalized, "§ 823 Abs. 1 BGB");
    assert_eq!(citation.component("code"), Some("BGB"));
    assert_eq!(citation.component("section"), Some("823"));
    assert_eq!(citation.component("paragraph"), Some("1"));
    assert_eq!(citation.lookup_citations, vec!["§ 823 BGB".to_string()]);
}

#[test]
fn parses_long_form_article_citation() {
    let grammar = GermanGrammar::new();
    let citation = grammar.parse("Artikel 1 Absatz 1 GG").expect("parse");
    assert_eq!(citation.kind, CitationKind::Article);
    assert_eq!(citation.normalized, "Art. 1 Abs. 1 GG");
    assert_eq!(citation.component("article"), Some("1"));
    assert_eq!(citation.lookup_citations, vec!["Art. 1 GG".to_string()]);
}

#[test]
fn parses_full_subdivision_tail() {
    let grammar = GermanGrammar::new();
    let citation = grammar.parse("§ 3 Abs. 1 Satz 2 Nr. 4 Buchst. B StGB").expect("parse");
    assert_eq!(citation.normalized, "§ 3 Abs. 1 S. 2 Nr. 4 Buchst. b STGB");
    assert_eq!(citation.component("sentence"), Some("2"));
    assert_eq!(citation.component("number"), Some("4"));
    assert_eq!(citation.component("letter"), Some("b"));
}

#[test]
fn list_and_range_specs_double_the_marker() {
    let grammar = GermanGrammar::new();
    let list = grammar.parse("§ 1, 2 BGB").expect("parse list");
    assert_eq!(list.normalized, "§§ 1, 2 BGB");
    assert_eq!(list.component("marker"), Some("§§"));
    assert_eq!(
        list.lookup_citations,
        vec!["§ 1 BGB".to_string(), "§ 2 BGB".to_string()]
    );

    let range = grammar.parse("§ 1 bis 3 BGB").expect("parse range");
    assert_eq!(range.normalized, "§§ 1 bis 3 BGB");

    let hyphen = grammar.parse("§§ 5-7 BGB").expect("parse hyphen range");
    assert_eq!(hyphen.normalized, "§§ 5-7 BGB");
}

#[test]
fn single_section_keeps_the_single_marker() {
    let grammar = GermanGrammar::new();
    let citation = grammar.parse("§§ 823 BGB").expect("parse");
    assert_eq!(citation.normalized, "§ 823 BGB");
}

#[test]
fn section_letter_suffix_is_lowercased() {
    let grammar = GermanGrammar::new();
    let citation = grammar.parse("§ 312B Abs. 1A BGB").expect("parse");
    assert_eq!(citation.normalized, "§ 312b Abs. 1a BGB");
    assert_eq!(citation.lookup_citations, vec!["§ 312b BGB".to_string()]);
}

#[test]
fn normalization_is_idempotent() {
    let grammar = GermanGrammar::new();
    for input in [
        "§ 823 abs. 1 bgb",
        "§§ 1, 2 bgb",
        "§ 1 bis 3 BGB",
        "artikel 20a gg",
        "Art. 6 Abs. 1 Buchst. f GG",
        "§ 3 Absatz 1 Satz 2 Nummer 4 Buchstabe b StGB",
    ] {
        let first = grammar.parse(input).expect("first parse");
        let second = grammar.parse(&first.normalized).expect("second parse");
        assert_eq!(first, second, "not idempotent for {input}");
    }
}

#[test]
fn unsupported_strings_parse_as_none() {
    let grammar = GermanGrammar::new();
    for input in ["", "BGB", "§", "§ BGB", "Randnummer 5 BGB", "Art. GG", "§ 1"] {
        assert!(grammar.parse(input).is_none(), "expected no parse for {input:?}");
    }
}

#[test]
fn short_style_drops_the_subdivision_tail() {
    let grammar = GermanGrammar::new();
    let citation = grammar.parse("§ 1 Absatz 1 bdsg").expect("parse");
    assert_eq!(grammar.format(&citation, CitationStyle::Short), "§ 1 BDSG");
    assert_eq!(grammar.format(&citation, CitationStyle::Default), "§ 1 Abs. 1 BDSG");
    assert_eq!(grammar.format(&citation, CitationStyle::Pinpoint), "§ 1 Abs. 1 BDSG");
}

#[test]
fn short_style_keeps_article_period() {
    let grammar = GermanGrammar::new();
    let citation = grammar.parse("Artikel 1 Absatz 1 GG").expect("parse");
    assert_eq!(grammar.format(&citation, CitationStyle::Short), "Art. 1 GG");
}

#[test]
fn short_style_keeps_the_full_section_spec() {
    let grammar = GermanGrammar::new();
    let citation = grammar.parse("§§ 1, 2 Abs. 3 BGB").expect("parse");
    assert_eq!(grammar.format(&citation, CitationStyle::Short), "§§ 1, 2 BGB");
}
