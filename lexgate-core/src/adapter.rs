// lexgate-core/src/adapter.rs
// ============================================================================
// Module: Jurisdiction Adapter Interface
// Description: The capability-flagged operation surface per jurisdiction.
// Purpose: Bind store, grammar, and extractor behind one uniform trait.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A jurisdiction adapter is the unit the shell dispatches to. Every
//! operation is a total function: it returns a payload, an explicit
//! "nothing found" value, or a structured [`AdapterError`]. It never
//! panics across the adapter boundary. Operations an adapter does not
//! implement keep their default bodies, which return
//! [`AdapterError::Unsupported`]; the shell's static gating ensures those
//! defaults are unreachable for correctly-flagged adapters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::capability::AdapterCapabilities;
use crate::capability::AdapterDescriptor;
use crate::capability::CapabilitySet;
use crate::document::Document;
use crate::eu::EuReference;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Adapter operation failure.
///
/// # Invariants
/// - Variants are stable for shell error-code mapping.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Caller-supplied arguments are invalid for the operation.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// Operation is not part of this adapter's static contract.
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
    /// Store access failed in a way local recovery could not absorb.
    #[error("store failure: {0}")]
    Store(String),
    /// Unexpected internal failure.
    #[error("internal failure: {0}")]
    Internal(String),
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Statute search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text or citation query.
    pub query: String,
    /// Result cap, clamped to `[1, 100]` by the caller.
    pub limit: usize,
}

/// Case-law search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseLawRequest {
    /// Free-text, citation, ECLI, or file-number query.
    pub query: String,
    /// Result cap, clamped to `[1, 100]` by the caller.
    pub limit: usize,
    /// Case-insensitive partial court filter.
    pub court: Option<String>,
    /// Inclusive lower bound on `decision_date` (ISO `YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Inclusive upper bound on `decision_date` (ISO `YYYY-MM-DD`).
    pub date_to: Option<String>,
}

/// Preparatory-works search request.
///
/// # Invariants
/// - At least one of `citation`, `statute_id`, `query` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparatoryWorksRequest {
    /// Statute citation hint.
    pub citation: Option<String>,
    /// Statute identifier hint.
    pub statute_id: Option<String>,
    /// Free-text hint.
    pub query: Option<String>,
    /// Result cap, clamped to `[1, 100]` by the caller.
    pub limit: usize,
}

/// Currency-check request.
///
/// # Invariants
/// - At least one of `citation`, `statute_id` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRequest {
    /// Citation selecting the provisions to check.
    pub citation: Option<String>,
    /// Statute identifier selecting the provisions to check.
    pub statute_id: Option<String>,
    /// Optional as-of date (ISO `YYYY-MM-DD`).
    pub as_of_date: Option<String>,
}

/// Legal-stance aggregation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalStanceRequest {
    /// Shared query for all categories.
    pub query: String,
    /// Per-category result cap.
    pub limit: usize,
    /// Include the case-law retrieval.
    pub include_case_law: bool,
    /// Include the preparatory-works retrieval.
    pub include_preparatory_works: bool,
}

/// EU-basis request.
///
/// # Invariants
/// - At least one of `citation`, `statute_id`, `document_id` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EuBasisRequest {
    /// Citation selecting the source provisions.
    pub citation: Option<String>,
    /// Statute identifier selecting the source provisions.
    pub statute_id: Option<String>,
    /// Single document identifier.
    pub document_id: Option<String>,
    /// Result cap, clamped to `[1, 200]` by the caller.
    pub limit: usize,
}

/// Ingestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionRequest {
    /// Source to ingest; the adapter's default source when absent.
    pub source_id: Option<String>,
    /// Report without writing.
    pub dry_run: bool,
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// A page of documents with its unique-document count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    /// Returned documents, unique by id.
    pub documents: Vec<Document>,
    /// Number of unique documents returned.
    pub total: usize,
}

impl DocumentPage {
    /// Wraps a document list, deriving `total` from its length.
    #[must_use]
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let total = documents.len();
        Self {
            documents,
            total,
        }
    }
}

/// Citation formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationStyle {
    /// Full normalized form.
    Default,
    /// Marker + section/article + code only.
    Short,
    /// Full normalized form including the subdivision tail.
    Pinpoint,
}

impl CitationStyle {
    /// Parses a style label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "default" => Some(Self::Default),
            "short" => Some(Self::Short),
            "pinpoint" => Some(Self::Pinpoint),
            _ => None,
        }
    }

    /// Returns the stable serialized label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Short => "short",
            Self::Pinpoint => "pinpoint",
        }
    }
}

/// Outcome of `parse_citation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Input as received.
    pub original: String,
    /// Canonical normalized citation.
    pub normalized: String,
    /// Parsed component bag.
    pub parsed: BTreeMap<String, String>,
}

/// Outcome of `validate_citation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when the citation is well-formed and, where the store is
    /// available, present in the corpus.
    pub valid: bool,
    /// Canonical normalized citation when the format is valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    /// Reason the citation was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Outcome of `format_citation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatReport {
    /// Input as received.
    pub original: String,
    /// Formatted citation (trimmed input when parsing failed).
    pub formatted: String,
    /// Style that was applied.
    pub style: CitationStyle,
    /// True when the input parsed.
    pub valid: bool,
    /// Reason formatting fell back to the trimmed input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Currency-check status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyStatus {
    /// Matches exist and the corpus snapshot supports currency.
    LikelyInForce,
    /// No matching provisions in the corpus.
    NotFound,
    /// The store is unavailable or the question predates the snapshot.
    Unknown,
}

/// Supporting evidence for a currency report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyEvidence {
    /// Number of matching provisions.
    pub matches: usize,
    /// Sample matching document id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_document_id: Option<String>,
}

/// Outcome of `check_currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyReport {
    /// Currency status.
    pub status: CurrencyStatus,
    /// Echoed statute identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statute_id: Option<String>,
    /// Echoed citation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    /// Echoed as-of date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of_date: Option<String>,
    /// Newest effective date among matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_date: Option<String>,
    /// Reason for a non-affirmative status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Supporting evidence for an affirmative status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<CurrencyEvidence>,
}

/// Outcome of `build_legal_stance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalStanceReport {
    /// Echoed query.
    pub query: String,
    /// Statute hits.
    pub statutes: Vec<Document>,
    /// Case-law hits (empty when excluded).
    pub case_law: Vec<Document>,
    /// Preparatory-work hits (empty when excluded).
    pub preparatory_works: Vec<Document>,
    /// Order-preserving deduplicated citations, capped at `2 × limit`.
    pub key_citations: Vec<String>,
}

/// A page of EU references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EuReferencePage {
    /// Extracted references.
    pub references: Vec<EuReference>,
    /// Number of references returned.
    pub total: usize,
}

impl EuReferencePage {
    /// Wraps a reference list, deriving `total` from its length.
    #[must_use]
    pub fn from_references(references: Vec<EuReference>) -> Self {
        let total = references.len();
        Self {
            references,
            total,
        }
    }
}

/// Per-act implementation summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EuImplementationSummary {
    /// Normalized EU identifier.
    pub eu_id: String,
    /// Detected act type label.
    pub eu_type: String,
    /// Number of distinct implementing documents.
    pub implementation_count: usize,
    /// Sorted distinct implementing statute identifiers.
    pub statute_ids: Vec<String>,
}

/// A page of implementation summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EuImplementationPage {
    /// Summaries ordered by implementation count, then identifier.
    pub results: Vec<EuImplementationSummary>,
    /// Number of summaries returned.
    pub total: usize,
}

impl EuImplementationPage {
    /// Wraps a summary list, deriving `total` from its length.
    #[must_use]
    pub fn from_results(results: Vec<EuImplementationSummary>) -> Self {
        let total = results.len();
        Self {
            results,
            total,
        }
    }
}

/// EU compliance mapping status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// National provisions referencing the act were found.
    Mapped,
    /// The corpus is available but carries no mapping.
    NotMapped,
    /// The store is unavailable; no statement can be made.
    Unknown,
}

/// Outcome of `validate_eu_compliance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    /// Echoed EU identifier (normalized).
    pub eu_id: String,
    /// Mapping status.
    pub status: ComplianceStatus,
    /// References supporting the mapping.
    pub matches: Vec<EuReference>,
    /// Sorted distinct statute identifiers among the matches.
    pub related_statutes: Vec<String>,
    /// Reason for a non-affirmative status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Outcome of `run_ingestion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionReport {
    /// RFC 3339 start timestamp.
    pub started_at: String,
    /// RFC 3339 finish timestamp.
    pub finished_at: String,
    /// Source that was ingested.
    pub source_id: String,
    /// True when no writes were requested.
    pub dry_run: bool,
    /// Number of ingested records (zero on any sub-process failure).
    pub ingested_count: u64,
    /// Number of skipped records (zero on any sub-process failure).
    pub skipped_count: u64,
}

// ============================================================================
// SECTION: Adapter Trait
// ============================================================================

/// The jurisdiction-scoped operation surface.
///
/// # Invariants
/// - Implementations are read-only against the store and hold no mutable
///   per-call state; concurrent calls are safe.
/// - Default method bodies return [`AdapterError::Unsupported`] and must
///   stay unreachable behind static capability gating.
pub trait JurisdictionAdapter: Send + Sync {
    /// Returns the static adapter descriptor.
    fn descriptor(&self) -> &AdapterDescriptor;

    /// Returns the static capability contract.
    fn capabilities(&self) -> AdapterCapabilities;

    /// Returns the runtime capability set of the current corpus snapshot.
    fn data_capabilities(&self) -> CapabilitySet;

    /// Three-tier statute search.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn search_documents(&self, request: &SearchRequest) -> Result<DocumentPage, AdapterError> {
        let _ = request;
        Err(AdapterError::Unsupported("search_documents"))
    }

    /// By-id lookup across all document tables.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn get_document(&self, id: &str) -> Result<Option<Document>, AdapterError> {
        let _ = id;
        Err(AdapterError::Unsupported("get_document"))
    }

    /// Three-tier case-law search with court and date filters.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn search_case_law(&self, request: &CaseLawRequest) -> Result<DocumentPage, AdapterError> {
        let _ = request;
        Err(AdapterError::Unsupported("search_case_law"))
    }

    /// Hint-driven preparatory-works search.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn get_preparatory_works(
        &self,
        request: &PreparatoryWorksRequest,
    ) -> Result<DocumentPage, AdapterError> {
        let _ = request;
        Err(AdapterError::Unsupported("get_preparatory_works"))
    }

    /// Parses a citation into its structured record.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported.
    fn parse_citation(&self, citation: &str) -> Result<Option<ParseReport>, AdapterError> {
        let _ = citation;
        Err(AdapterError::Unsupported("parse_citation"))
    }

    /// Validates citation format and corpus presence.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn validate_citation(&self, citation: &str) -> Result<ValidationReport, AdapterError> {
        let _ = citation;
        Err(AdapterError::Unsupported("validate_citation"))
    }

    /// Renders a citation in the requested style.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported.
    fn format_citation(
        &self,
        citation: &str,
        style: CitationStyle,
    ) -> Result<FormatReport, AdapterError> {
        let _ = (citation, style);
        Err(AdapterError::Unsupported("format_citation"))
    }

    /// Best-effort "likely in force" check against the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn check_currency(&self, request: &CurrencyRequest) -> Result<CurrencyReport, AdapterError> {
        let _ = request;
        Err(AdapterError::Unsupported("check_currency"))
    }

    /// Aggregates statutes, case law, and preparatory works for a query.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn build_legal_stance(
        &self,
        request: &LegalStanceRequest,
    ) -> Result<LegalStanceReport, AdapterError> {
        let _ = request;
        Err(AdapterError::Unsupported("build_legal_stance"))
    }

    /// EU references of the selected national provisions.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn get_eu_basis(&self, request: &EuBasisRequest) -> Result<EuReferencePage, AdapterError> {
        let _ = request;
        Err(AdapterError::Unsupported("get_eu_basis"))
    }

    /// Searches documents and summarizes their EU references.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn search_eu_implementations(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<EuImplementationPage, AdapterError> {
        let _ = (query, limit);
        Err(AdapterError::Unsupported("search_eu_implementations"))
    }

    /// National provisions implementing the given EU act.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn get_national_implementations(
        &self,
        eu_id: &str,
        limit: usize,
    ) -> Result<EuImplementationPage, AdapterError> {
        let _ = (eu_id, limit);
        Err(AdapterError::Unsupported("get_national_implementations"))
    }

    /// EU references of one provision.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn get_provision_eu_basis(
        &self,
        document_id: &str,
        limit: usize,
    ) -> Result<EuReferencePage, AdapterError> {
        let _ = (document_id, limit);
        Err(AdapterError::Unsupported("get_provision_eu_basis"))
    }

    /// Checks whether national provisions map to an EU act.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported or the
    /// store fails irrecoverably.
    fn validate_eu_compliance(
        &self,
        eu_id: &str,
        citation: Option<&str>,
        statute_id: Option<&str>,
    ) -> Result<ComplianceReport, AdapterError> {
        let _ = (eu_id, citation, statute_id);
        Err(AdapterError::Unsupported("validate_eu_compliance"))
    }

    /// Runs the external ingestion command for a source.
    ///
    /// Sub-process failures surface as a zeroed report, never as an error.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the operation is unsupported.
    fn run_ingestion(&self, request: &IngestionRequest) -> Result<IngestionReport, AdapterError> {
        let _ = request;
        Err(AdapterError::Unsupported("run_ingestion"))
    }
}
