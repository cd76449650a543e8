// lexgate-core/src/document/tests.rs
// ============================================================================
// Module: Document Model Unit Tests
// Description: Unit tests for document kinds and metadata filtering.
// Purpose: Validate the closed kind set and scalar metadata invariant.
// Dependencies: lexgate-core
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use serde_json::json;

use super::Document;
use super::DocumentKind;
use super::scalar_metadata;

#[test]
fn kind_labels_round_trip() {
    for kind in [
        DocumentKind::Statute,
        DocumentKind::Regulation,
        DocumentKind::Case,
        DocumentKind::PreparatoryWork,
        DocumentKind::Other,
    ] {
        assert_eq!(DocumentKind::parse(kind.as_str()), kind);
    }
}

#[test]
fn unknown_kind_label_maps_to_other() {
    assert_eq!(DocumentKind::parse("ordinance"), DocumentKind::Other);
    assert_eq!(DocumentKind::parse(""), DocumentKind::Other);
}

#[test]
fn scalar_metadata_drops_nested_values() {
    let metadata = scalar_metadata(json!({
        "court": "BGH",
        "year": 2021,
        "final": true,
        "note": null,
        "tags": ["a", "b"],
        "extra": {"nested": 1}
    }));
    assert_eq!(metadata.len(), 4);
    assert!(metadata.contains_key("court"));
    assert!(metadata.contains_key("year"));
    assert!(metadata.contains_key("final"));
    assert!(metadata.contains_key("note"));
    assert!(!metadata.contains_key("tags"));
    assert!(!metadata.contains_key("extra"));
}

#[test]
fn scalar_metadata_of_non_object_is_empty() {
    assert!(scalar_metadata(json!(["a"])).is_empty());
    assert!(scalar_metadata(json!("text")).is_empty());
}

#[test]
fn searchable_text_collapses_whitespace() {
    let document = Document {
        id: "bdsg:1".to_string(),
        jurisdiction: "de".to_string(),
        kind: DocumentKind::Statute,
        title: "BDSG  § 1".to_string(),
        citation: Some("§ 1 BDSG".to_string()),
        source_url: None,
        effective_date: None,
        text_snippet: Some("Anwendungsbereich\n des Gesetzes".to_string()),
        metadata: scalar_metadata(json!({"statute_id": "bdsg"})),
    };
    let text = document.searchable_text();
    assert_eq!(text, "BDSG § 1 § 1 BDSG Anwendungsbereich des Gesetzes bdsg");
}
