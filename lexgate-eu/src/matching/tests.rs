// lexgate-eu/src/matching/tests.rs
// ============================================================================
// Module: EU Matching Unit Tests
// Description: Unit tests for identifier matching and summaries.
// Purpose: Validate normalization tolerance and summary ordering.
// Dependencies: lexgate-eu, lexgate-core
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use lexgate_core::DocumentKind;
use lexgate_core::EuActType;
use lexgate_core::EuReference;

use super::identifiers_match;
use super::normalize_identifier;
use super::summarize_implementations;

fn reference(eu_id: &str, source_id: &str, statute_id: Option<&str>) -> EuReference {
    EuReference {
        eu_id: eu_id.to_string(),
        eu_type: EuActType::Regulation,
        source_kind: DocumentKind::Statute,
        source_id: source_id.to_string(),
        source_statute_id: statute_id.map(str::to_string),
        source_citation: None,
        source_title: None,
        source_url: None,
        context_snippet: None,
        confidence: 0.95,
    }
}

#[test]
fn normalization_resolves_celex_into_the_shared_space() {
    assert_eq!(normalize_identifier("32016R0679"), "EU 2016/679");
    assert_eq!(normalize_identifier("Richtlinie 95/46/EG"), "EG 95/46");
    assert_eq!(normalize_identifier("  2016/679 "), "2016/679");
}

#[test]
fn identifiers_match_across_renderings() {
    assert!(identifiers_match("EU 2016/679", "2016/679"));
    assert!(identifiers_match("EU 2016/679", "32016R0679"));
    assert!(identifiers_match("(EU) 2016/679", "eu 2016/679"));
    assert!(!identifiers_match("EU 2016/679", "EU 2016/680"));
}

#[test]
fn summaries_count_distinct_sources_and_sort() {
    let references = vec![
        reference("EU 2016/679", "bdsg:1", Some("bdsg")),
        reference("EU 2016/679", "bdsg:2", Some("bdsg")),
        reference("EU 2016/679", "sgb:1", Some("sgb")),
        reference("EG 95/46", "bdsg:1", Some("bdsg")),
    ];
    let summaries = summarize_implementations(&references);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].eu_id, "EU 2016/679");
    assert_eq!(summaries[0].implementation_count, 3);
    assert_eq!(summaries[0].statute_ids, vec!["bdsg".to_string(), "sgb".to_string()]);
    assert_eq!(summaries[1].eu_id, "EG 95/46");
    assert_eq!(summaries[1].implementation_count, 1);
}

#[test]
fn equal_counts_order_by_identifier() {
    let references = vec![
        reference("EU 2019/1937", "a:1", None),
        reference("EU 2016/679", "b:1", None),
    ];
    let summaries = summarize_implementations(&references);
    assert_eq!(summaries[0].eu_id, "EU 2016/679");
    assert_eq!(summaries[1].eu_id, "EU 2019/1937");
}
