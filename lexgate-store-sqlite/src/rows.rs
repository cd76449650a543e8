// lexgate-store-sqlite/src/rows.rs
// ============================================================================
// Module: Row Mapping
// Description: Maps corpus table rows onto the shared document model.
// Purpose: Keep column order and metadata merging in one place.
// Dependencies: lexgate-core, rusqlite, serde_json
// ============================================================================

//! ## Overview
//! Each corpus table has one column list constant and one mapping
//! function. Table-specific columns (court, ECLI, statute citation) are
//! folded into the document's scalar metadata so downstream consumers see
//! one uniform record. `metadata_json` scalars are merged; nested values
//! are dropped at this boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use lexgate_core::Document;
use lexgate_core::DocumentKind;
use lexgate_core::Metadata;
use lexgate_core::scalar_metadata;
use rusqlite::Row;
use serde_json::Value;

// ============================================================================
// SECTION: Column Lists
// ============================================================================

/// Columns selected from `law_documents`, in mapping order.
pub const LAW_COLUMNS: &str = "id, country, statute_id, section_ref, kind, title, citation, \
     source_url, effective_date, text_snippet, metadata_json";

/// Columns selected from `case_law_documents`, in mapping order.
pub const CASE_COLUMNS: &str = "id, country, case_id, ecli, court, decision_date, file_number, \
     decision_type, title, citation, source_url, text_snippet, metadata_json";

/// Columns selected from `preparatory_works`, in mapping order.
pub const PREP_COLUMNS: &str = "id, country, dip_id, title, statute_id, statute_citation, \
     work_type, publication_date, source_url, text_snippet, metadata_json";

/// Qualifies a column list with a table alias for join queries.
#[must_use]
pub fn qualified(columns: &str, alias: &str) -> String {
    columns
        .split(',')
        .map(|column| format!("{alias}.{}", column.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps a `law_documents` row.
///
/// # Errors
///
/// Returns [`rusqlite::Error`] when a column has an unexpected type.
pub fn map_law_row(row: &Row<'_>) -> Result<Document, rusqlite::Error> {
    let statute_id: Option<String> = row.get(2)?;
    let section_ref: Option<String> = row.get(3)?;
    let kind: String = row.get(4)?;
    let mut metadata = decode_metadata(row.get::<_, Option<String>>(10)?);
    if let Some(statute_id) = statute_id {
        metadata.insert("statute_id".to_string(), Value::String(statute_id));
    }
    if let Some(section_ref) = section_ref {
        metadata.insert("section_ref".to_string(), Value::String(section_ref));
    }
    Ok(Document {
        id: row.get(0)?,
        jurisdiction: row.get(1)?,
        kind: DocumentKind::parse(&kind),
        title: row.get(5)?,
        citation: row.get(6)?,
        source_url: row.get(7)?,
        effective_date: row.get(8)?,
        text_snippet: row.get(9)?,
        metadata,
    })
}

/// Maps a `case_law_documents` row.
///
/// The decision date doubles as the document's effective date.
///
/// # Errors
///
/// Returns [`rusqlite::Error`] when a column has an unexpected type.
pub fn map_case_row(row: &Row<'_>) -> Result<Document, rusqlite::Error> {
    let decision_date: Option<String> = row.get(5)?;
    let mut metadata = decode_metadata(row.get::<_, Option<String>>(12)?);
    insert_scalar(&mut metadata, "case_id", row.get::<_, Option<String>>(2)?);
    insert_scalar(&mut metadata, "ecli", row.get::<_, Option<String>>(3)?);
    insert_scalar(&mut metadata, "court", row.get::<_, Option<String>>(4)?);
    insert_scalar(&mut metadata, "decision_date", decision_date.clone());
    insert_scalar(&mut metadata, "file_number", row.get::<_, Option<String>>(6)?);
    insert_scalar(&mut metadata, "decision_type", row.get::<_, Option<String>>(7)?);
    Ok(Document {
        id: row.get(0)?,
        jurisdiction: row.get(1)?,
        kind: DocumentKind::Case,
        title: row.get(8)?,
        citation: row.get(9)?,
        source_url: row.get(10)?,
        effective_date: decision_date,
        text_snippet: row.get(11)?,
        metadata,
    })
}

/// Maps a `preparatory_works` row.
///
/// The publication date doubles as the document's effective date.
///
/// # Errors
///
/// Returns [`rusqlite::Error`] when a column has an unexpected type.
pub fn map_prep_row(row: &Row<'_>) -> Result<Document, rusqlite::Error> {
    let publication_date: Option<String> = row.get(7)?;
    let mut metadata = decode_metadata(row.get::<_, Option<String>>(10)?);
    insert_scalar(&mut metadata, "dip_id", row.get::<_, Option<String>>(2)?);
    insert_scalar(&mut metadata, "statute_id", row.get::<_, Option<String>>(4)?);
    insert_scalar(&mut metadata, "statute_citation", row.get::<_, Option<String>>(5)?);
    insert_scalar(&mut metadata, "work_type", row.get::<_, Option<String>>(6)?);
    insert_scalar(&mut metadata, "publication_date", publication_date.clone());
    Ok(Document {
        id: row.get(0)?,
        jurisdiction: row.get(1)?,
        kind: DocumentKind::PreparatoryWork,
        title: row.get(3)?,
        citation: row.get(5)?,
        source_url: row.get(8)?,
        effective_date: publication_date,
        text_snippet: row.get(9)?,
        metadata,
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes `metadata_json`, keeping scalar entries only.
fn decode_metadata(raw: Option<String>) -> Metadata {
    raw.and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .map(scalar_metadata)
        .unwrap_or_default()
}

/// Inserts a column value into the metadata bag when present.
fn insert_scalar(metadata: &mut Metadata, key: &str, value: Option<String>) {
    if let Some(value) = value {
        metadata.insert(key.to_string(), Value::String(value));
    }
}
