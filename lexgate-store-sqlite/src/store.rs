// lexgate-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Corpus Store
// Description: Read-only corpus access with three-tier retrieval.
// Purpose: Serve deterministic searches and capability probing.
// Dependencies: lexgate-core, lexgate-grammar, rusqlite
// ============================================================================

//! ## Overview
//! The store owns one read-only `SQLite` handle per jurisdiction. On open
//! it probes `sqlite_master` once, derives the capability set and corpus
//! metadata, and keeps both immutable for the process lifetime. Searches
//! run the exact-citation stage first, then ranked full text, then the
//! substring fallback. Results merge with stable deduplication by
//! document id; later stages only contribute rows earlier stages have
//! not seen.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

use lexgate_core::CapabilitySet;
use lexgate_core::CaseLawRequest;
use lexgate_core::DataCapability;
use lexgate_core::Document;
use lexgate_core::PreparatoryWorksRequest;
use lexgate_grammar::CitationGrammar;
use lexgate_grammar::compile_fts_query;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params_from_iter;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::rows::CASE_COLUMNS;
use crate::rows::LAW_COLUMNS;
use crate::rows::PREP_COLUMNS;
use crate::rows::map_case_row;
use crate::rows::map_law_row;
use crate::rows::map_prep_row;
use crate::rows::qualified;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Smallest accepted result cap.
const MIN_LIMIT: usize = 1;
/// Largest accepted result cap.
const MAX_LIMIT: usize = 100;
/// Minimum substring token length in characters.
const MIN_TOKEN_CHARS: usize = 2;

// ============================================================================
// SECTION: Availability
// ============================================================================

/// Read outcome distinguishing an absent corpus from an empty result.
///
/// # Invariants
/// - `Unavailable` means the database file or the backing table is
///   missing; a legitimate zero-row answer is always `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability<T> {
    /// The corpus answered; the payload may be empty.
    Ready(T),
    /// The corpus cannot answer at all.
    Unavailable,
}

impl<T> Availability<T> {
    /// Returns the payload when the corpus answered.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Unavailable => None,
        }
    }

    /// Returns true when the corpus could not answer.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Store failure that local recovery could not absorb.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening the database failed.
    #[error("database open failed: {0}")]
    Open(rusqlite::Error),
    /// A read query failed.
    #[error("query failed: {0}")]
    Query(rusqlite::Error),
    /// The handle was used without an open database.
    #[error("database handle closed")]
    Closed,
    /// The connection lock was poisoned by a panicking reader.
    #[error("store lock poisoned")]
    Poisoned,
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Configuration for opening a corpus store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the corpus database file.
    pub path: PathBuf,
    /// Jurisdiction code every query is scoped to.
    pub jurisdiction: String,
}

/// Corpus snapshot metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusMetadata {
    /// Corpus tier label.
    pub tier: Option<String>,
    /// Schema version label.
    pub schema_version: Option<String>,
    /// Build timestamp.
    pub built_at: Option<String>,
    /// Builder identifier.
    pub builder: Option<String>,
}

/// Per-table row counts; absent tables report `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCounts {
    /// Rows in `law_documents`.
    pub law_documents: Option<u64>,
    /// Rows in `case_law_documents`.
    pub case_law_documents: Option<u64>,
    /// Rows in `preparatory_works`.
    pub preparatory_works: Option<u64>,
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Read-only corpus store scoped to one jurisdiction.
///
/// # Invariants
/// - The capability set and metadata are derived once at open time and
///   never change afterwards.
/// - All statements are read-only; the store never writes.
pub struct CorpusStore {
    /// Read-only connection; absent when the database file is missing.
    connection: Option<Mutex<Connection>>,
    /// Jurisdiction code applied to every query.
    jurisdiction: String,
    /// Tables present in the snapshot.
    tables: BTreeSet<String>,
    /// Runtime capability set derived from table presence.
    capabilities: CapabilitySet,
    /// Corpus snapshot metadata.
    metadata: CorpusMetadata,
}

impl CorpusStore {
    /// Opens the corpus read-only and probes its capabilities.
    ///
    /// A missing database file yields an unavailable store, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when an existing file cannot be opened or
    /// probed.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if !config.path.exists() {
            return Ok(Self::unavailable(config.jurisdiction));
        }
        let connection = Connection::open_with_flags(
            &config.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(StoreError::Open)?;
        let tables = probe_tables(&connection)?;
        let capabilities = derive_capabilities(&tables);
        let metadata = read_metadata(&connection, &tables)?;
        Ok(Self {
            connection: Some(Mutex::new(connection)),
            jurisdiction: config.jurisdiction,
            tables,
            capabilities,
            metadata,
        })
    }

    /// Creates a store that reports every read as unavailable.
    #[must_use]
    pub fn unavailable(jurisdiction: String) -> Self {
        Self {
            connection: None,
            jurisdiction,
            tables: BTreeSet::new(),
            capabilities: CapabilitySet::empty(),
            metadata: CorpusMetadata::default(),
        }
    }

    /// Returns true when at least one corpus table can answer.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.connection.is_some()
            && ["law_documents", "case_law_documents", "preparatory_works"]
                .iter()
                .any(|table| self.tables.contains(*table))
    }

    /// Returns the capability set derived at open time.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Returns the corpus snapshot metadata.
    #[must_use]
    pub const fn metadata(&self) -> &CorpusMetadata {
        &self.metadata
    }

    // ========================================================================
    // SECTION: Statute Search
    // ========================================================================

    /// Three-tier statute search.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a query fails irrecoverably.
    pub fn search_documents(
        &self,
        query: &str,
        limit: usize,
        grammar: &dyn CitationGrammar,
    ) -> Result<Availability<Vec<Document>>, StoreError> {
        if !self.table_ready("law_documents") {
            return Ok(Availability::Unavailable);
        }
        let limit = clamp_limit(limit);
        let mut results: Vec<Document> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        if let Some(citation) = grammar.parse(query) {
            for lookup in &citation.lookup_citations {
                if results.len() >= limit {
                    break;
                }
                let rows = self.law_rows_by_citation(&lookup.to_lowercase(), limit)?;
                push_unseen(&mut results, &mut seen, rows, limit);
            }
        }

        if results.len() < limit {
            let compiled = compile_fts_query(query);
            if !compiled.primary.is_empty() {
                let rows = self.law_rows_fts(&compiled.primary, &seen, limit)?;
                push_unseen(&mut results, &mut seen, rows, limit);
                if results.len() < limit
                    && let Some(fallback) = &compiled.fallback
                {
                    let rows = self.law_rows_fts(fallback, &seen, limit)?;
                    push_unseen(&mut results, &mut seen, rows, limit);
                }
            }
        }

        if results.len() < limit {
            let tokens = substring_tokens(query);
            if !tokens.is_empty() {
                let rows = self.law_rows_substring(&tokens, &seen, limit)?;
                push_unseen(&mut results, &mut seen, rows, limit);
            }
        }

        Ok(Availability::Ready(results))
    }

    fn law_rows_by_citation(
        &self,
        lookup: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let sql = format!(
            "SELECT {LAW_COLUMNS} FROM law_documents \
             WHERE country = ? AND LOWER(IFNULL(citation, '')) = ? \
             ORDER BY id ASC LIMIT {limit}"
        );
        self.select(&sql, &[self.jurisdiction.clone(), lookup.to_string()], map_law_row)
    }

    fn law_rows_fts(
        &self,
        expression: &str,
        seen: &BTreeSet<String>,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let columns = qualified(LAW_COLUMNS, "d");
        let (exclusion, mut params) = exclusion_clause("d.id", seen);
        let sql = format!(
            "SELECT {columns} FROM law_documents_fts f \
             JOIN law_documents d ON d.rowid = f.rowid \
             WHERE law_documents_fts MATCH ? AND d.country = ?{exclusion} \
             ORDER BY f.rank LIMIT {limit}"
        );
        let mut all = vec![expression.to_string(), self.jurisdiction.clone()];
        all.append(&mut params);
        self.fts_select(&sql, &all, map_law_row)
    }

    fn law_rows_substring(
        &self,
        tokens: &[String],
        seen: &BTreeSet<String>,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let mut params = vec![self.jurisdiction.clone()];
        let mut predicates = String::new();
        for token in tokens {
            predicates.push_str(
                " AND (LOWER(title) LIKE ? ESCAPE '\\' \
                 OR LOWER(IFNULL(citation, '')) LIKE ? ESCAPE '\\' \
                 OR LOWER(IFNULL(text_snippet, '')) LIKE ? ESCAPE '\\')",
            );
            let pattern = like_pattern(token);
            params.push(pattern.clone());
            params.push(pattern.clone());
            params.push(pattern);
        }
        let (exclusion, mut exclusion_params) = exclusion_clause("id", seen);
        params.append(&mut exclusion_params);
        let sql = format!(
            "SELECT {LAW_COLUMNS} FROM law_documents \
             WHERE country = ?{predicates}{exclusion} \
             ORDER BY id ASC LIMIT {limit}"
        );
        self.select(&sql, &params, map_law_row)
    }

    // ========================================================================
    // SECTION: Case-Law Search
    // ========================================================================

    /// Three-tier case-law search with court and date filters.
    ///
    /// The exact stage matches the query against ECLI, file number,
    /// citation, case id, and id. Filters apply at every stage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a query fails irrecoverably.
    pub fn search_case_law(
        &self,
        request: &CaseLawRequest,
    ) -> Result<Availability<Vec<Document>>, StoreError> {
        if !self.table_ready("case_law_documents") {
            return Ok(Availability::Unavailable);
        }
        let limit = clamp_limit(request.limit);
        let (filters, filter_params) = case_filters(request);
        let mut results: Vec<Document> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        let key = request.query.trim().to_lowercase();
        if !key.is_empty() {
            let mut params = vec![self.jurisdiction.clone()];
            params.extend(std::iter::repeat_n(key, 5));
            params.extend(filter_params.iter().cloned());
            let sql = format!(
                "SELECT {CASE_COLUMNS} FROM case_law_documents \
                 WHERE country = ? \
                 AND (LOWER(IFNULL(ecli, '')) = ? OR LOWER(IFNULL(file_number, '')) = ? \
                 OR LOWER(IFNULL(citation, '')) = ? OR LOWER(case_id) = ? OR LOWER(id) = ?)\
                 {filters} \
                 ORDER BY decision_date DESC, id DESC LIMIT {limit}"
            );
            let rows = self.select(&sql, &params, map_case_row)?;
            push_unseen(&mut results, &mut seen, rows, limit);
        }

        if results.len() < limit {
            let compiled = compile_fts_query(&request.query);
            if !compiled.primary.is_empty() {
                let rows =
                    self.case_rows_fts(&compiled.primary, &filters, &filter_params, &seen, limit)?;
                push_unseen(&mut results, &mut seen, rows, limit);
                if results.len() < limit
                    && let Some(fallback) = &compiled.fallback
                {
                    let rows =
                        self.case_rows_fts(fallback, &filters, &filter_params, &seen, limit)?;
                    push_unseen(&mut results, &mut seen, rows, limit);
                }
            }
        }

        if results.len() < limit {
            let tokens = substring_tokens(&request.query);
            if !tokens.is_empty() {
                let mut params = vec![self.jurisdiction.clone()];
                let mut predicates = String::new();
                for token in &tokens {
                    predicates.push_str(
                        " AND (LOWER(title) LIKE ? ESCAPE '\\' \
                         OR LOWER(IFNULL(citation, '')) LIKE ? ESCAPE '\\' \
                         OR LOWER(IFNULL(text_snippet, '')) LIKE ? ESCAPE '\\')",
                    );
                    let pattern = like_pattern(token);
                    params.push(pattern.clone());
                    params.push(pattern.clone());
                    params.push(pattern);
                }
                params.extend(filter_params.iter().cloned());
                let (exclusion, mut exclusion_params) = exclusion_clause("id", &seen);
                params.append(&mut exclusion_params);
                let sql = format!(
                    "SELECT {CASE_COLUMNS} FROM case_law_documents \
                     WHERE country = ?{predicates}{filters}{exclusion} \
                     ORDER BY decision_date DESC, id DESC LIMIT {limit}"
                );
                let rows = self.select(&sql, &params, map_case_row)?;
                push_unseen(&mut results, &mut seen, rows, limit);
            }
        }

        Ok(Availability::Ready(results))
    }

    fn case_rows_fts(
        &self,
        expression: &str,
        filters: &str,
        filter_params: &[String],
        seen: &BTreeSet<String>,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let columns = qualified(CASE_COLUMNS, "d");
        // The filter fragment references court and decision_date only;
        // neither exists on the FTS mirror, so they stay unambiguous.
        let (exclusion, mut exclusion_params) = exclusion_clause("d.id", seen);
        let sql = format!(
            "SELECT {columns} FROM case_law_documents_fts f \
             JOIN case_law_documents d ON d.rowid = f.rowid \
             WHERE case_law_documents_fts MATCH ? AND d.country = ?{filters}{exclusion} \
             ORDER BY f.rank LIMIT {limit}"
        );
        let mut params = vec![expression.to_string(), self.jurisdiction.clone()];
        params.extend(filter_params.iter().cloned());
        params.append(&mut exclusion_params);
        self.fts_select(&sql, &params, map_case_row)
    }

    // ========================================================================
    // SECTION: Preparatory-Works Search
    // ========================================================================

    /// Hint-driven preparatory-works search.
    ///
    /// Hints are assembled from citation, statute id, query, and the
    /// parsed citation's code. The full-text stage uses the first hint;
    /// the substring stage runs once per hint. Without hints the search
    /// degrades to a filter-only listing by publication date.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a query fails irrecoverably.
    pub fn search_preparatory_works(
        &self,
        request: &PreparatoryWorksRequest,
        grammar: &dyn CitationGrammar,
    ) -> Result<Availability<Vec<Document>>, StoreError> {
        if !self.table_ready("preparatory_works") {
            return Ok(Availability::Unavailable);
        }
        let limit = clamp_limit(request.limit);
        let hints = preparatory_hints(request, grammar);
        let mut results: Vec<Document> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        if hints.is_empty() {
            let sql = format!(
                "SELECT {PREP_COLUMNS} FROM preparatory_works WHERE country = ? \
                 ORDER BY publication_date DESC, id DESC LIMIT {limit}"
            );
            let rows = self.select(&sql, &[self.jurisdiction.clone()], map_prep_row)?;
            push_unseen(&mut results, &mut seen, rows, limit);
            return Ok(Availability::Ready(results));
        }

        if let Some(first) = hints.first() {
            let compiled = compile_fts_query(first);
            if !compiled.primary.is_empty() {
                let rows = self.prep_rows_fts(&compiled.primary, &seen, limit)?;
                push_unseen(&mut results, &mut seen, rows, limit);
                if results.len() < limit
                    && let Some(fallback) = &compiled.fallback
                {
                    let rows = self.prep_rows_fts(fallback, &seen, limit)?;
                    push_unseen(&mut results, &mut seen, rows, limit);
                }
            }
        }

        for hint in &hints {
            if results.len() >= limit {
                break;
            }
            let tokens = substring_tokens(hint);
            if tokens.is_empty() {
                continue;
            }
            let rows = self.prep_rows_substring(&tokens, &seen, limit)?;
            push_unseen(&mut results, &mut seen, rows, limit);
        }

        Ok(Availability::Ready(results))
    }

    fn prep_rows_fts(
        &self,
        expression: &str,
        seen: &BTreeSet<String>,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let columns = qualified(PREP_COLUMNS, "d");
        let (exclusion, mut params) = exclusion_clause("d.id", seen);
        let sql = format!(
            "SELECT {columns} FROM preparatory_works_fts f \
             JOIN preparatory_works d ON d.rowid = f.rowid \
             WHERE preparatory_works_fts MATCH ? AND d.country = ?{exclusion} \
             ORDER BY f.rank LIMIT {limit}"
        );
        let mut all = vec![expression.to_string(), self.jurisdiction.clone()];
        all.append(&mut params);
        self.fts_select(&sql, &all, map_prep_row)
    }

    fn prep_rows_substring(
        &self,
        tokens: &[String],
        seen: &BTreeSet<String>,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let mut params = vec![self.jurisdiction.clone()];
        let mut predicates = String::new();
        for token in tokens {
            predicates.push_str(
                " AND (LOWER(title) LIKE ? ESCAPE '\\' \
                 OR LOWER(IFNULL(statute_citation, '')) LIKE ? ESCAPE '\\' \
                 OR LOWER(IFNULL(text_snippet, '')) LIKE ? ESCAPE '\\')",
            );
            let pattern = like_pattern(token);
            params.push(pattern.clone());
            params.push(pattern.clone());
            params.push(pattern);
        }
        let (exclusion, mut exclusion_params) = exclusion_clause("id", seen);
        params.append(&mut exclusion_params);
        let sql = format!(
            "SELECT {PREP_COLUMNS} FROM preparatory_works \
             WHERE country = ?{predicates}{exclusion} \
             ORDER BY publication_date DESC, id DESC LIMIT {limit}"
        );
        self.select(&sql, &params, map_prep_row)
    }

    // ========================================================================
    // SECTION: Lookups
    // ========================================================================

    /// By-id lookup probing statutes, case law, then preparatory works.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a query fails irrecoverably.
    pub fn get_document(&self, id: &str) -> Result<Availability<Option<Document>>, StoreError> {
        if !self.is_available() {
            return Ok(Availability::Unavailable);
        }
        if self.tables.contains("law_documents") {
            let sql = format!(
                "SELECT {LAW_COLUMNS} FROM law_documents WHERE country = ? AND id = ? LIMIT 1"
            );
            if let Some(document) = self.select_one(&sql, id, map_law_row)? {
                return Ok(Availability::Ready(Some(document)));
            }
        }
        if self.tables.contains("case_law_documents") {
            let sql = format!(
                "SELECT {CASE_COLUMNS} FROM case_law_documents WHERE country = ? AND id = ? LIMIT 1"
            );
            if let Some(document) = self.select_one(&sql, id, map_case_row)? {
                return Ok(Availability::Ready(Some(document)));
            }
        }
        if self.tables.contains("preparatory_works") {
            let sql = format!(
                "SELECT {PREP_COLUMNS} FROM preparatory_works WHERE country = ? AND id = ? LIMIT 1"
            );
            if let Some(document) = self.select_one(&sql, id, map_prep_row)? {
                return Ok(Availability::Ready(Some(document)));
            }
        }
        Ok(Availability::Ready(None))
    }

    /// By-citation lookup joining on any normalized form.
    ///
    /// Rows matching the preferred normalization come first. Input the
    /// grammar rejects is matched verbatim, lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a query fails irrecoverably.
    pub fn get_documents_by_citation(
        &self,
        citation: &str,
        limit: usize,
        grammar: &dyn CitationGrammar,
    ) -> Result<Availability<Vec<Document>>, StoreError> {
        if !self.table_ready("law_documents") {
            return Ok(Availability::Unavailable);
        }
        let limit = clamp_limit(limit);
        let lookups: Vec<String> = grammar.parse(citation).map_or_else(
            || vec![citation.trim().to_lowercase()],
            |parsed| {
                parsed.lookup_citations.iter().map(|lookup| lookup.to_lowercase()).collect()
            },
        );
        let mut results: Vec<Document> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();
        for lookup in &lookups {
            if results.len() >= limit {
                break;
            }
            let rows = self.law_rows_by_citation(lookup, limit)?;
            push_unseen(&mut results, &mut seen, rows, limit);
        }
        Ok(Availability::Ready(results))
    }

    /// Fetches every provision of a statute ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a query fails irrecoverably.
    pub fn get_documents_by_statute(
        &self,
        statute_id: &str,
        limit: usize,
    ) -> Result<Availability<Vec<Document>>, StoreError> {
        if !self.table_ready("law_documents") {
            return Ok(Availability::Unavailable);
        }
        let limit = clamp_limit(limit);
        let sql = format!(
            "SELECT {LAW_COLUMNS} FROM law_documents \
             WHERE country = ? AND LOWER(statute_id) = ? ORDER BY id ASC LIMIT {limit}"
        );
        let params = [self.jurisdiction.clone(), statute_id.trim().to_lowercase()];
        let rows = self.select(&sql, &params, map_law_row)?;
        Ok(Availability::Ready(rows))
    }

    /// Per-table row counts for diagnostics and ingestion workflows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a count query fails.
    pub fn counts(&self) -> Result<Availability<TableCounts>, StoreError> {
        if !self.is_available() {
            return Ok(Availability::Unavailable);
        }
        let counts = TableCounts {
            law_documents: self.count_table("law_documents")?,
            case_law_documents: self.count_table("case_law_documents")?,
            preparatory_works: self.count_table("preparatory_works")?,
        };
        Ok(Availability::Ready(counts))
    }

    fn count_table(&self, table: &str) -> Result<Option<u64>, StoreError> {
        if !self.tables.contains(table) {
            return Ok(None);
        }
        let guard = self.lock()?;
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE country = ?");
        let count: u64 = guard
            .query_row(&sql, [self.jurisdiction.as_str()], |row| row.get(0))
            .map_err(StoreError::Query)?;
        Ok(Some(count))
    }

    // ========================================================================
    // SECTION: Plumbing
    // ========================================================================

    fn table_ready(&self, table: &str) -> bool {
        self.connection.is_some() && self.tables.contains(table)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        let Some(connection) = &self.connection else {
            return Err(StoreError::Closed);
        };
        connection.lock().map_err(|_| StoreError::Poisoned)
    }

    fn select(
        &self,
        sql: &str,
        params: &[String],
        mapper: fn(&Row<'_>) -> Result<Document, rusqlite::Error>,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.lock()?;
        let mut statement = guard.prepare(sql).map_err(StoreError::Query)?;
        let rows = statement
            .query_map(params_from_iter(params.iter()), mapper)
            .map_err(StoreError::Query)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::Query)
    }

    /// Runs an FTS query, absorbing match-expression failures.
    ///
    /// The compiler keeps expressions parse-safe, but a quoted token that
    /// tokenizes to nothing is backend-defined; local recovery returns an
    /// empty stage so later tiers still run.
    fn fts_select(
        &self,
        sql: &str,
        params: &[String],
        mapper: fn(&Row<'_>) -> Result<Document, rusqlite::Error>,
    ) -> Result<Vec<Document>, StoreError> {
        match self.select(sql, params, mapper) {
            Ok(rows) => Ok(rows),
            Err(StoreError::Query(rusqlite::Error::SqliteFailure(..))) => Ok(Vec::new()),
            Err(other) => Err(other),
        }
    }

    fn select_one(
        &self,
        sql: &str,
        id: &str,
        mapper: fn(&Row<'_>) -> Result<Document, rusqlite::Error>,
    ) -> Result<Option<Document>, StoreError> {
        let guard = self.lock()?;
        guard
            .query_row(sql, [self.jurisdiction.as_str(), id], mapper)
            .optional()
            .map_err(StoreError::Query)
    }
}

// ============================================================================
// SECTION: Probing
// ============================================================================

/// Collects table and view names from the schema catalog.
fn probe_tables(connection: &Connection) -> Result<BTreeSet<String>, StoreError> {
    let mut statement = connection
        .prepare("SELECT name FROM sqlite_master WHERE type IN ('table', 'view')")
        .map_err(StoreError::Open)?;
    let names = statement
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(StoreError::Open)?
        .collect::<Result<BTreeSet<_>, _>>()
        .map_err(StoreError::Open)?;
    Ok(names)
}

/// Derives the capability set from table presence.
///
/// `law_documents` also enables `eu_references`: extraction operates on
/// stored documents and needs nothing else.
fn derive_capabilities(tables: &BTreeSet<String>) -> CapabilitySet {
    let mut capabilities = CapabilitySet::empty();
    if tables.contains("law_documents") {
        capabilities.insert(DataCapability::CoreLegislation);
        capabilities.insert(DataCapability::EuReferences);
    }
    if tables.contains("case_law_documents") {
        capabilities.insert(DataCapability::BasicCaseLaw);
    }
    if tables.contains("preparatory_works") {
        capabilities.insert(DataCapability::FullPreparatoryWorks);
    }
    if tables.contains("expanded_case_law") {
        capabilities.insert(DataCapability::ExpandedCaseLaw);
    }
    if tables.contains("agency_guidance") {
        capabilities.insert(DataCapability::AgencyGuidance);
    }
    capabilities
}

/// Reads the optional key-value metadata table.
fn read_metadata(
    connection: &Connection,
    tables: &BTreeSet<String>,
) -> Result<CorpusMetadata, StoreError> {
    let mut metadata = CorpusMetadata::default();
    if !tables.contains("corpus_metadata") {
        return Ok(metadata);
    }
    let mut statement = connection
        .prepare("SELECT key, value FROM corpus_metadata")
        .map_err(StoreError::Open)?;
    let entries = statement
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(StoreError::Open)?;
    for entry in entries {
        let (key, value) = entry.map_err(StoreError::Open)?;
        match key.as_str() {
            "tier" => metadata.tier = Some(value),
            "schema_version" => metadata.schema_version = Some(value),
            "built_at" => metadata.built_at = Some(value),
            "builder" => metadata.builder = Some(value),
            _ => {}
        }
    }
    Ok(metadata)
}

// ============================================================================
// SECTION: Query Helpers
// ============================================================================

/// Clamps a caller-provided limit to the accepted range.
#[must_use]
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

/// NFC-normalized lowercase tokens of at least two characters.
fn substring_tokens(query: &str) -> Vec<String> {
    query
        .nfc()
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Escapes LIKE wildcards and wraps the token in `%`.
fn like_pattern(token: &str) -> String {
    let escaped = token.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

/// Builds an `AND <column> NOT IN (...)` fragment for seen ids.
fn exclusion_clause(column: &str, seen: &BTreeSet<String>) -> (String, Vec<String>) {
    if seen.is_empty() {
        return (String::new(), Vec::new());
    }
    let placeholders = vec!["?"; seen.len()].join(", ");
    let clause = format!(" AND {column} NOT IN ({placeholders})");
    (clause, seen.iter().cloned().collect())
}

/// Appends rows whose id has not been seen, up to the limit.
fn push_unseen(
    results: &mut Vec<Document>,
    seen: &mut BTreeSet<String>,
    rows: Vec<Document>,
    limit: usize,
) {
    for row in rows {
        if results.len() >= limit {
            break;
        }
        if seen.insert(row.id.clone()) {
            results.push(row);
        }
    }
}

/// Builds the shared case-law filter fragment and its parameters.
fn case_filters(request: &CaseLawRequest) -> (String, Vec<String>) {
    let mut sql = String::new();
    let mut params = Vec::new();
    if let Some(court) = &request.court {
        sql.push_str(" AND LOWER(IFNULL(court, '')) LIKE ? ESCAPE '\\'");
        params.push(like_pattern(&court.to_lowercase()));
    }
    if let Some(from) = &request.date_from {
        sql.push_str(" AND decision_date >= ?");
        params.push(from.clone());
    }
    if let Some(to) = &request.date_to {
        sql.push_str(" AND decision_date <= ?");
        params.push(to.clone());
    }
    (sql, params)
}

/// Assembles preparatory-works hints in priority order.
fn preparatory_hints(
    request: &PreparatoryWorksRequest,
    grammar: &dyn CitationGrammar,
) -> Vec<String> {
    let mut hints = Vec::new();
    if let Some(citation) = &request.citation
        && !citation.trim().is_empty()
    {
        hints.push(citation.trim().to_string());
        if let Some(parsed) = grammar.parse(citation)
            && let Some(code) = parsed.code()
        {
            hints.push(code.to_string());
        }
    }
    if let Some(statute_id) = &request.statute_id
        && !statute_id.trim().is_empty()
    {
        hints.push(statute_id.trim().to_string());
    }
    if let Some(query) = &request.query
        && !query.trim().is_empty()
    {
        hints.push(query.trim().to_string());
    }
    hints
}

// ============================================================================
// SECTION: Tests
// ============================================================================
