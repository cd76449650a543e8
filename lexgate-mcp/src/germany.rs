// lexgate-mcp/src/germany.rs
// ============================================================================
// Module: Germany Adapter
// Description: Full-contract adapter over the German federal-law corpus.
// Purpose: Bind store, grammar, and EU extractor behind the adapter trait.
// Dependencies: lexgate-core, lexgate-grammar, lexgate-eu,
//               lexgate-store-sqlite
// ============================================================================

//! ## Overview
//! The Germany adapter carries the full static contract. Retrieval runs
//! against the SQLite corpus; when the corpus file is absent the adapter
//! degrades to the embedded seed set for statute lookups and reports the
//! seed capability set. Degradation happens only on the `Unavailable`
//! sentinel; an empty corpus answer stays empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use lexgate_core::AdapterCapabilities;
use lexgate_core::AdapterDescriptor;
use lexgate_core::AdapterError;
use lexgate_core::CapabilitySet;
use lexgate_core::CaseLawRequest;
use lexgate_core::CitationStyle;
use lexgate_core::ComplianceReport;
use lexgate_core::ComplianceStatus;
use lexgate_core::CurrencyEvidence;
use lexgate_core::CurrencyReport;
use lexgate_core::CurrencyRequest;
use lexgate_core::CurrencyStatus;
use lexgate_core::DataCapability;
use lexgate_core::Document;
use lexgate_core::DocumentPage;
use lexgate_core::EuBasisRequest;
use lexgate_core::EuImplementationPage;
use lexgate_core::EuReference;
use lexgate_core::EuReferencePage;
use lexgate_core::FormatReport;
use lexgate_core::IngestionReport;
use lexgate_core::IngestionRequest;
use lexgate_core::JurisdictionAdapter;
use lexgate_core::LegalStanceReport;
use lexgate_core::LegalStanceRequest;
use lexgate_core::ParseReport;
use lexgate_core::PreparatoryWorksRequest;
use lexgate_core::SearchRequest;
use lexgate_core::SourceDescriptor;
use lexgate_core::ValidationReport;
use lexgate_eu::extract_document_references;
use lexgate_eu::identifiers_match;
use lexgate_eu::normalize_identifier;
use lexgate_eu::strip_jurisdiction;
use lexgate_eu::summarize_implementations;
use lexgate_grammar::CitationGrammar;
use lexgate_grammar::GermanGrammar;
use lexgate_store_sqlite::Availability;
use lexgate_store_sqlite::CorpusStore;
use lexgate_store_sqlite::StoreError;

use crate::ingestion::IngestionRunner;
use crate::seed::find_seed_document;
use crate::seed::german_seed_documents;
use crate::seed::search_seed_documents;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Largest accepted limit for the EU linkage family.
const MAX_EU_LIMIT: usize = 200;
/// Reference pool multiplier before truncation.
const EU_POOL_FACTOR: usize = 24;
/// Document fetch cap for corpus-wide EU scans.
const EU_SCAN_LIMIT: usize = 100;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Full-contract adapter for German federal law.
pub struct GermanyAdapter {
    /// Static adapter descriptor.
    descriptor: AdapterDescriptor,
    /// Corpus store scoped to `de`.
    store: CorpusStore,
    /// German citation grammar.
    grammar: GermanGrammar,
    /// Embedded fallback documents.
    seeds: Vec<Document>,
    /// External ingestion runner.
    ingestion: IngestionRunner,
}

impl GermanyAdapter {
    /// Creates the adapter over an opened store.
    #[must_use]
    pub fn new(store: CorpusStore, ingestion: IngestionRunner) -> Self {
        Self {
            descriptor: AdapterDescriptor {
                jurisdiction_code: "de".to_string(),
                name: "Germany".to_string(),
                default_language: "de".to_string(),
                sources: vec![
                    SourceDescriptor {
                        id: "gesetze-im-internet".to_string(),
                        name: "Gesetze im Internet".to_string(),
                        url: "https://www.gesetze-im-internet.de".to_string(),
                    },
                    SourceDescriptor {
                        id: "rechtsprechung-im-internet".to_string(),
                        name: "Rechtsprechung im Internet".to_string(),
                        url: "https://www.rechtsprechung-im-internet.de".to_string(),
                    },
                    SourceDescriptor {
                        id: "dip-bundestag".to_string(),
                        name: "DIP Bundestag".to_string(),
                        url: "https://dip.bundestag.de".to_string(),
                    },
                ],
            },
            store,
            grammar: GermanGrammar::new(),
            seeds: german_seed_documents(),
            ingestion,
        }
    }

    fn store_failure(error: StoreError) -> AdapterError {
        AdapterError::Store(error.to_string())
    }

    /// Gathers currency candidates, degrading to seeds when the store is
    /// unavailable.
    fn currency_candidates(
        &self,
        citation: Option<&str>,
        statute_id: Option<&str>,
    ) -> Result<(Vec<Document>, bool), AdapterError> {
        let mut documents: Vec<Document> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut unavailable = false;

        if let Some(statute_id) = statute_id {
            match self
                .store
                .get_documents_by_statute(statute_id, EU_SCAN_LIMIT)
                .map_err(Self::store_failure)?
            {
                Availability::Ready(rows) => collect_unique(&mut documents, &mut seen, rows),
                Availability::Unavailable => unavailable = true,
            }
        }
        if let Some(citation) = citation {
            match self
                .store
                .get_documents_by_citation(citation, EU_SCAN_LIMIT, &self.grammar)
                .map_err(Self::store_failure)?
            {
                Availability::Ready(rows) => collect_unique(&mut documents, &mut seen, rows),
                Availability::Unavailable => unavailable = true,
            }
        }

        if unavailable {
            collect_unique(
                &mut documents,
                &mut seen,
                self.seed_candidates(citation, statute_id),
            );
        }
        Ok((documents, unavailable))
    }

    /// Seed candidates matching a citation or statute id.
    fn seed_candidates(&self, citation: Option<&str>, statute_id: Option<&str>) -> Vec<Document> {
        let lookups: Vec<String> = citation
            .and_then(|citation| self.grammar.parse(citation))
            .map(|parsed| {
                parsed.lookup_citations.iter().map(|lookup| lookup.to_lowercase()).collect()
            })
            .unwrap_or_default();
        self.seeds
            .iter()
            .filter(|document| {
                let statute_matched = statute_id.is_some_and(|statute_id| {
                    document.metadata.get("statute_id").and_then(|value| value.as_str())
                        == Some(statute_id.to_lowercase().as_str())
                });
                let citation_matched = document
                    .citation
                    .as_deref()
                    .is_some_and(|citation| lookups.contains(&citation.to_lowercase()));
                statute_matched || citation_matched
            })
            .cloned()
            .collect()
    }

    /// Documents selected by an EU-basis request, with an availability
    /// marker.
    fn eu_basis_documents(
        &self,
        request: &EuBasisRequest,
    ) -> Result<(Vec<Document>, bool), AdapterError> {
        let mut documents: Vec<Document> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut unavailable = false;

        if let Some(document_id) = &request.document_id {
            match self.store.get_document(document_id).map_err(Self::store_failure)? {
                Availability::Ready(found) => {
                    if let Some(document) = found {
                        collect_unique(&mut documents, &mut seen, vec![document]);
                    }
                }
                Availability::Unavailable => {
                    unavailable = true;
                    if let Some(document) = find_seed_document(&self.seeds, document_id) {
                        collect_unique(&mut documents, &mut seen, vec![document]);
                    }
                }
            }
        }
        if let Some(statute_id) = &request.statute_id {
            match self
                .store
                .get_documents_by_statute(statute_id, EU_SCAN_LIMIT)
                .map_err(Self::store_failure)?
            {
                Availability::Ready(rows) => collect_unique(&mut documents, &mut seen, rows),
                Availability::Unavailable => {
                    unavailable = true;
                    collect_unique(
                        &mut documents,
                        &mut seen,
                        self.seed_candidates(None, Some(statute_id)),
                    );
                }
            }
        }
        if let Some(citation) = &request.citation {
            match self
                .store
                .get_documents_by_citation(citation, EU_SCAN_LIMIT, &self.grammar)
                .map_err(Self::store_failure)?
            {
                Availability::Ready(rows) => collect_unique(&mut documents, &mut seen, rows),
                Availability::Unavailable => {
                    unavailable = true;
                    collect_unique(
                        &mut documents,
                        &mut seen,
                        self.seed_candidates(Some(citation), None),
                    );
                }
            }
        }
        Ok((documents, unavailable))
    }

    /// Extracts references from documents, bounded by the pool cap.
    fn extract_pool(documents: &[Document], limit: usize) -> Vec<EuReference> {
        let pool_cap = limit.saturating_mul(EU_POOL_FACTOR);
        let mut references: Vec<EuReference> = Vec::new();
        for document in documents {
            if references.len() >= pool_cap {
                break;
            }
            references.extend(extract_document_references(document));
        }
        references.truncate(pool_cap);
        references
    }

    /// Documents likely referencing an EU act, by corpus scan or seeds.
    fn implementation_documents(&self, eu_id: &str) -> Result<Vec<Document>, AdapterError> {
        let normalized = normalize_identifier(eu_id);
        let query = strip_jurisdiction(&normalized).to_string();
        match self
            .store
            .search_documents(&query, EU_SCAN_LIMIT, &self.grammar)
            .map_err(Self::store_failure)?
        {
            Availability::Ready(rows) => Ok(rows),
            Availability::Unavailable => Ok(self.seeds.clone()),
        }
    }
}

/// Clamps an EU-family limit to `[1, 200]`.
fn clamp_eu_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_EU_LIMIT)
}

/// Appends rows with unseen ids.
fn collect_unique(documents: &mut Vec<Document>, seen: &mut BTreeSet<String>, rows: Vec<Document>) {
    for row in rows {
        if seen.insert(row.id.clone()) {
            documents.push(row);
        }
    }
}

/// Order-preserving citation union capped at `2 × limit`.
fn key_citations(pages: &[&[Document]], limit: usize) -> Vec<String> {
    let mut citations: Vec<String> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for page in pages {
        for document in *page {
            if citations.len() >= limit.saturating_mul(2) {
                return citations;
            }
            if let Some(citation) = &document.citation
                && seen.insert(citation.clone())
            {
                citations.push(citation.clone());
            }
        }
    }
    citations
}

// ============================================================================
// SECTION: Trait Implementation
// ============================================================================

impl JurisdictionAdapter for GermanyAdapter {
    fn descriptor(&self) -> &AdapterDescriptor {
        &self.descriptor
    }

    fn capabilities(&self) -> AdapterCapabilities {
        AdapterCapabilities::full()
    }

    fn data_capabilities(&self) -> CapabilitySet {
        if self.store.is_available() {
            self.store.capabilities().clone()
        } else {
            // The seed set carries statutes with EU references.
            CapabilitySet::from_capabilities([
                DataCapability::CoreLegislation,
                DataCapability::EuReferences,
            ])
        }
    }

    fn search_documents(&self, request: &SearchRequest) -> Result<DocumentPage, AdapterError> {
        match self
            .store
            .search_documents(&request.query, request.limit, &self.grammar)
            .map_err(Self::store_failure)?
        {
            Availability::Ready(documents) => Ok(DocumentPage::from_documents(documents)),
            Availability::Unavailable => Ok(DocumentPage::from_documents(search_seed_documents(
                &self.seeds,
                &request.query,
                request.limit,
                &self.grammar,
            ))),
        }
    }

    fn get_document(&self, id: &str) -> Result<Option<Document>, AdapterError> {
        match self.store.get_document(id).map_err(Self::store_failure)? {
            Availability::Ready(document) => Ok(document),
            Availability::Unavailable => Ok(find_seed_document(&self.seeds, id)),
        }
    }

    fn search_case_law(&self, request: &CaseLawRequest) -> Result<DocumentPage, AdapterError> {
        match self.store.search_case_law(request).map_err(Self::store_failure)? {
            Availability::Ready(documents) => Ok(DocumentPage::from_documents(documents)),
            // No case-law seeds exist; an absent table answers empty.
            Availability::Unavailable => Ok(DocumentPage::default()),
        }
    }

    fn get_preparatory_works(
        &self,
        request: &PreparatoryWorksRequest,
    ) -> Result<DocumentPage, AdapterError> {
        if request.citation.is_none() && request.statute_id.is_none() && request.query.is_none() {
            return Err(AdapterError::InvalidArguments(
                "one of citation, statuteId, query is required".to_string(),
            ));
        }
        match self
            .store
            .search_preparatory_works(request, &self.grammar)
            .map_err(Self::store_failure)?
        {
            Availability::Ready(documents) => Ok(DocumentPage::from_documents(documents)),
            Availability::Unavailable => Ok(DocumentPage::default()),
        }
    }

    fn parse_citation(&self, citation: &str) -> Result<Option<ParseReport>, AdapterError> {
        Ok(self.grammar.parse(citation).map(|parsed| ParseReport {
            original: citation.to_string(),
            normalized: parsed.normalized.clone(),
            parsed: parsed.parsed,
        }))
    }

    fn validate_citation(&self, citation: &str) -> Result<ValidationReport, AdapterError> {
        let Some(parsed) = self.grammar.parse(citation) else {
            return Ok(ValidationReport {
                valid: false,
                normalized: None,
                reason: Some("unrecognized citation format".to_string()),
            });
        };
        match self
            .store
            .get_documents_by_citation(citation, 1, &self.grammar)
            .map_err(Self::store_failure)?
        {
            Availability::Ready(rows) if rows.is_empty() => Ok(ValidationReport {
                valid: false,
                normalized: Some(parsed.normalized),
                reason: Some("format valid, not in corpus".to_string()),
            }),
            Availability::Ready(_) | Availability::Unavailable => Ok(ValidationReport {
                valid: true,
                normalized: Some(parsed.normalized),
                reason: None,
            }),
        }
    }

    fn format_citation(
        &self,
        citation: &str,
        style: CitationStyle,
    ) -> Result<FormatReport, AdapterError> {
        match self.grammar.parse(citation) {
            Some(parsed) => Ok(FormatReport {
                original: citation.to_string(),
                formatted: self.grammar.format(&parsed, style),
                style,
                valid: true,
                reason: None,
            }),
            None => Ok(FormatReport {
                original: citation.to_string(),
                formatted: citation.trim().to_string(),
                style,
                valid: false,
                reason: Some("unrecognized citation format".to_string()),
            }),
        }
    }

    fn check_currency(&self, request: &CurrencyRequest) -> Result<CurrencyReport, AdapterError> {
        let (documents, unavailable) = self
            .currency_candidates(request.citation.as_deref(), request.statute_id.as_deref())?;

        let mut report = CurrencyReport {
            status: CurrencyStatus::Unknown,
            statute_id: request.statute_id.clone(),
            citation: request.citation.clone(),
            as_of_date: request.as_of_date.clone(),
            source_date: None,
            reason: None,
            evidence: None,
        };

        if documents.is_empty() {
            if unavailable {
                report.reason = Some("corpus unavailable".to_string());
            } else {
                report.status = CurrencyStatus::NotFound;
                report.reason = Some("no matching provisions in the corpus".to_string());
            }
            return Ok(report);
        }

        let source_date = documents
            .iter()
            .filter_map(|document| document.effective_date.as_deref())
            .max()
            .map(str::to_string);
        report.source_date = source_date.clone();

        if let (Some(as_of), Some(source)) = (request.as_of_date.as_deref(), source_date.as_deref())
            && as_of < source
        {
            // Consolidated current text cannot attest historical state.
            report.reason = Some(format!(
                "corpus holds consolidated text as of {source}; cannot attest state at {as_of}"
            ));
            return Ok(report);
        }

        report.status = CurrencyStatus::LikelyInForce;
        report.evidence = Some(CurrencyEvidence {
            matches: documents.len(),
            sample_document_id: documents.first().map(|document| document.id.clone()),
        });
        Ok(report)
    }

    fn build_legal_stance(
        &self,
        request: &LegalStanceRequest,
    ) -> Result<LegalStanceReport, AdapterError> {
        let statutes = self
            .search_documents(&SearchRequest {
                query: request.query.clone(),
                limit: request.limit,
            })?
            .documents;
        let case_law = if request.include_case_law {
            self.search_case_law(&CaseLawRequest {
                query: request.query.clone(),
                limit: request.limit,
                court: None,
                date_from: None,
                date_to: None,
            })?
            .documents
        } else {
            Vec::new()
        };
        let preparatory_works = if request.include_preparatory_works {
            self.get_preparatory_works(&PreparatoryWorksRequest {
                citation: None,
                statute_id: None,
                query: Some(request.query.clone()),
                limit: request.limit,
            })?
            .documents
        } else {
            Vec::new()
        };

        let key_citations = key_citations(
            &[statutes.as_slice(), case_law.as_slice(), preparatory_works.as_slice()],
            request.limit,
        );
        Ok(LegalStanceReport {
            query: request.query.clone(),
            statutes,
            case_law,
            preparatory_works,
            key_citations,
        })
    }

    fn get_eu_basis(&self, request: &EuBasisRequest) -> Result<EuReferencePage, AdapterError> {
        if request.citation.is_none()
            && request.statute_id.is_none()
            && request.document_id.is_none()
        {
            return Err(AdapterError::InvalidArguments(
                "one of citation, statuteId, documentId is required".to_string(),
            ));
        }
        let limit = clamp_eu_limit(request.limit);
        let (documents, _) = self.eu_basis_documents(request)?;
        let mut references = Self::extract_pool(&documents, limit);
        references.truncate(limit);
        Ok(EuReferencePage::from_references(references))
    }

    fn search_eu_implementations(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<EuImplementationPage, AdapterError> {
        let limit = clamp_eu_limit(limit);
        let documents = match self
            .store
            .search_documents(query, EU_SCAN_LIMIT, &self.grammar)
            .map_err(Self::store_failure)?
        {
            Availability::Ready(rows) => rows,
            Availability::Unavailable => {
                search_seed_documents(&self.seeds, query, EU_SCAN_LIMIT, &self.grammar)
            }
        };
        let references = Self::extract_pool(&documents, limit);
        let mut results = summarize_implementations(&references);
        results.truncate(limit);
        Ok(EuImplementationPage::from_results(results))
    }

    fn get_national_implementations(
        &self,
        eu_id: &str,
        limit: usize,
    ) -> Result<EuImplementationPage, AdapterError> {
        let limit = clamp_eu_limit(limit);
        let documents = self.implementation_documents(eu_id)?;
        let references: Vec<EuReference> = Self::extract_pool(&documents, limit)
            .into_iter()
            .filter(|reference| identifiers_match(&reference.eu_id, eu_id))
            .collect();
        let mut results = summarize_implementations(&references);
        results.truncate(limit);
        Ok(EuImplementationPage::from_results(results))
    }

    fn get_provision_eu_basis(
        &self,
        document_id: &str,
        limit: usize,
    ) -> Result<EuReferencePage, AdapterError> {
        let limit = clamp_eu_limit(limit);
        let document = self.get_document(document_id)?;
        let mut references =
            document.map(|document| extract_document_references(&document)).unwrap_or_default();
        references.truncate(limit);
        Ok(EuReferencePage::from_references(references))
    }

    fn validate_eu_compliance(
        &self,
        eu_id: &str,
        citation: Option<&str>,
        statute_id: Option<&str>,
    ) -> Result<ComplianceReport, AdapterError> {
        let normalized = normalize_identifier(eu_id);
        let (documents, unavailable) = if citation.is_some() || statute_id.is_some() {
            self.currency_candidates(citation, statute_id)?
        } else {
            (self.implementation_documents(eu_id)?, !self.store.is_available())
        };

        let matches: Vec<EuReference> = Self::extract_pool(&documents, MAX_EU_LIMIT)
            .into_iter()
            .filter(|reference| identifiers_match(&reference.eu_id, eu_id))
            .collect();

        let related_statutes: Vec<String> = matches
            .iter()
            .filter_map(|reference| reference.source_statute_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let (status, reason) = if !matches.is_empty() {
            (ComplianceStatus::Mapped, None)
        } else if unavailable && documents.is_empty() {
            (ComplianceStatus::Unknown, Some("corpus unavailable".to_string()))
        } else {
            (
                ComplianceStatus::NotMapped,
                Some("no national reference to the act was found".to_string()),
            )
        };

        Ok(ComplianceReport {
            eu_id: normalized,
            status,
            matches,
            related_statutes,
            reason,
        })
    }

    fn run_ingestion(&self, request: &IngestionRequest) -> Result<IngestionReport, AdapterError> {
        Ok(self.ingestion.run(request.source_id.as_deref(), request.dry_run))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
