// lexgate-mcp/src/germany/tests.rs
// ============================================================================
// Module: Germany Adapter Unit Tests
// Description: Unit tests for fallback, stance, currency, and EU linkage.
// Purpose: Validate adapter behavior over present and absent corpora.
// Dependencies: lexgate-mcp, lexgate-core, rusqlite, tempfile
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::path::Path;

use lexgate_core::ComplianceStatus;
use lexgate_core::CurrencyRequest;
use lexgate_core::CurrencyStatus;
use lexgate_core::DataCapability;
use lexgate_core::EuBasisRequest;
use lexgate_core::JurisdictionAdapter;
use lexgate_core::LegalStanceRequest;
use lexgate_core::SearchRequest;
use lexgate_store_sqlite::CorpusStore;
use lexgate_store_sqlite::StoreConfig;
use rusqlite::Connection;
use tempfile::TempDir;

use crate::ingestion::IngestionRunner;

use super::GermanyAdapter;

const SCHEMA: &str = "
CREATE TABLE law_documents (
  id TEXT PRIMARY KEY, country TEXT NOT NULL, statute_id TEXT NOT NULL,
  section_ref TEXT NOT NULL, kind TEXT NOT NULL, title TEXT NOT NULL,
  citation TEXT, source_url TEXT, effective_date TEXT, text_snippet TEXT,
  metadata_json TEXT, updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE VIRTUAL TABLE law_documents_fts USING fts5(
  title, citation, text_snippet,
  content='law_documents', content_rowid='rowid', tokenize='unicode61'
);
CREATE TRIGGER law_documents_ai AFTER INSERT ON law_documents BEGIN
  INSERT INTO law_documents_fts(rowid, title, citation, text_snippet)
  VALUES (new.rowid, new.title, COALESCE(new.citation, ''), COALESCE(new.text_snippet, ''));
END;
";

fn corpus_adapter(path: &Path) -> GermanyAdapter {
    let connection = Connection::open(path).expect("open writable");
    connection.execute_batch(SCHEMA).expect("create schema");
    connection
        .execute_batch(
            "INSERT INTO law_documents \
             (id, country, statute_id, section_ref, kind, title, citation, source_url, \
              effective_date, text_snippet, metadata_json) VALUES
             ('bdsg:1', 'de', 'bdsg', '1', 'statute', 'BDSG § 1 Anwendungsbereich',
              '§ 1 BDSG', NULL, '2018-05-25',
              'Dieses Gesetz dient der Durchführung der Verordnung (EU) 2016/679 und der \
               Umsetzung der Richtlinie (EU) 2016/680.', NULL),
             ('bdsg:20', 'de', 'bdsg', '20', 'statute', 'BDSG § 20 Gerichtlicher Rechtsschutz',
              '§ 20 BDSG', NULL, '2019-11-26',
              'Rechtsschutz nach der Verordnung (EU) 2016/679.', NULL),
             ('urhg:1', 'de', 'urhg', '1', 'statute', 'UrhG § 1 Allgemeines',
              '§ 1 UrhG', NULL, '2021-06-07', 'Schutz der Urheber von Werken.', NULL);",
        )
        .expect("insert rows");
    drop(connection);
    let store = CorpusStore::open(StoreConfig {
        path: path.to_path_buf(),
        jurisdiction: "de".to_string(),
    })
    .expect("open store");
    GermanyAdapter::new(store, IngestionRunner::disabled())
}

fn absent_adapter(dir: &TempDir) -> GermanyAdapter {
    let store = CorpusStore::open(StoreConfig {
        path: dir.path().join("absent.db"),
        jurisdiction: "de".to_string(),
    })
    .expect("open store");
    GermanyAdapter::new(store, IngestionRunner::disabled())
}

// ============================================================================
// SECTION: Fallback Tests
// ============================================================================

#[test]
fn absent_corpus_reports_the_seed_capability_set() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = absent_adapter(&dir);
    let capabilities = adapter.data_capabilities();
    assert!(capabilities.contains(DataCapability::CoreLegislation));
    assert!(capabilities.contains(DataCapability::EuReferences));
    assert!(!capabilities.contains(DataCapability::BasicCaseLaw));
}

#[test]
fn absent_corpus_serves_seed_documents_by_id() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = absent_adapter(&dir);
    let document = adapter.get_document("gg:art-1").expect("get").expect("document");
    assert_eq!(document.citation.as_deref(), Some("Art. 1 GG"));
}

#[test]
fn empty_corpus_answer_does_not_degrade_to_seeds() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("corpus.db");
    let connection = Connection::open(&path).expect("open writable");
    connection.execute_batch(SCHEMA).expect("create schema");
    drop(connection);
    let store = CorpusStore::open(StoreConfig {
        path,
        jurisdiction: "de".to_string(),
    })
    .expect("open store");
    let adapter = GermanyAdapter::new(store, IngestionRunner::disabled());

    let page = adapter
        .search_documents(&SearchRequest {
            query: "§ 823 BGB".to_string(),
            limit: 5,
        })
        .expect("search");
    assert_eq!(page.total, 0, "empty corpus must not answer from seeds");
}

// ============================================================================
// SECTION: Currency Tests
// ============================================================================

#[test]
fn currency_not_found_for_an_unknown_statute() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = corpus_adapter(&dir.path().join("corpus.db"));
    let report = adapter
        .check_currency(&CurrencyRequest {
            citation: None,
            statute_id: Some("stgb".to_string()),
            as_of_date: None,
        })
        .expect("currency");
    assert_eq!(report.status, CurrencyStatus::NotFound);
}

#[test]
fn currency_uses_the_newest_effective_date() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = corpus_adapter(&dir.path().join("corpus.db"));
    let report = adapter
        .check_currency(&CurrencyRequest {
            citation: None,
            statute_id: Some("bdsg".to_string()),
            as_of_date: None,
        })
        .expect("currency");
    assert_eq!(report.status, CurrencyStatus::LikelyInForce);
    assert_eq!(report.source_date.as_deref(), Some("2019-11-26"));
    let evidence = report.evidence.expect("evidence");
    assert_eq!(evidence.matches, 2);
    assert_eq!(evidence.sample_document_id.as_deref(), Some("bdsg:1"));
}

#[test]
fn currency_with_unavailable_store_and_no_candidates_is_unknown() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = absent_adapter(&dir);
    let report = adapter
        .check_currency(&CurrencyRequest {
            citation: Some("§ 99 StVO".to_string()),
            statute_id: None,
            as_of_date: None,
        })
        .expect("currency");
    assert_eq!(report.status, CurrencyStatus::Unknown);
    assert_eq!(report.reason.as_deref(), Some("corpus unavailable"));
}

// ============================================================================
// SECTION: Legal Stance Tests
// ============================================================================

#[test]
fn stance_deduplicates_key_citations_in_order() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = corpus_adapter(&dir.path().join("corpus.db"));
    let report = adapter
        .build_legal_stance(&LegalStanceRequest {
            query: "Verordnung Rechtsschutz".to_string(),
            limit: 5,
            include_case_law: false,
            include_preparatory_works: false,
        })
        .expect("stance");
    assert!(report.case_law.is_empty());
    assert!(report.preparatory_works.is_empty());
    let mut seen = report.key_citations.clone();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), report.key_citations.len());
    assert!(report.key_citations.len() <= 10);
}

// ============================================================================
// SECTION: EU Linkage Tests
// ============================================================================

#[test]
fn eu_basis_extracts_both_acts_from_the_statute() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = corpus_adapter(&dir.path().join("corpus.db"));
    let page = adapter
        .get_eu_basis(&EuBasisRequest {
            citation: None,
            statute_id: Some("bdsg".to_string()),
            document_id: None,
            limit: 50,
        })
        .expect("basis");
    let ids: Vec<&str> = page.references.iter().map(|reference| reference.eu_id.as_str()).collect();
    assert!(ids.contains(&"EU 2016/679"));
    assert!(ids.contains(&"EU 2016/680"));
}

#[test]
fn national_implementations_group_by_statute() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = corpus_adapter(&dir.path().join("corpus.db"));
    let page = adapter.get_national_implementations("32016R0679", 50).expect("implementations");
    assert_eq!(page.total, 1);
    assert_eq!(page.results[0].eu_id, "EU 2016/679");
    assert_eq!(page.results[0].implementation_count, 2);
    assert_eq!(page.results[0].statute_ids, vec!["bdsg".to_string()]);
}

#[test]
fn compliance_maps_when_a_reference_exists() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = corpus_adapter(&dir.path().join("corpus.db"));
    let report = adapter
        .validate_eu_compliance("EU 2016/679", None, Some("bdsg"))
        .expect("compliance");
    assert_eq!(report.status, ComplianceStatus::Mapped);
    assert_eq!(report.related_statutes, vec!["bdsg".to_string()]);
    assert!(!report.matches.is_empty());
}

#[test]
fn compliance_not_mapped_when_the_statute_lacks_the_reference() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = corpus_adapter(&dir.path().join("corpus.db"));
    let report = adapter
        .validate_eu_compliance("EU 2019/790", None, Some("urhg"))
        .expect("compliance");
    assert_eq!(report.status, ComplianceStatus::NotMapped);
    assert!(report.matches.is_empty());
}

#[test]
fn provision_basis_reads_one_document() {
    let dir = TempDir::new().expect("tempdir");
    let adapter = corpus_adapter(&dir.path().join("corpus.db"));
    let page = adapter.get_provision_eu_basis("bdsg:1", 10).expect("basis");
    assert_eq!(page.references.len(), 2);
    assert!(page.references.iter().all(|reference| reference.source_id == "bdsg:1"));
}
