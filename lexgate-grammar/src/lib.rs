// lexgate-grammar/src/lib.rs
// ============================================================================
// Module: Lexgate Grammar Library
// Description: Citation grammars and the full-text query compiler.
// Purpose: Parse jurisdictional citations and compile safe FTS queries.
// Dependencies: lexgate-core, regex
// ============================================================================

//! ## Overview
//! This crate turns citation strings into [`lexgate_core::ParsedCitation`]
//! records and free-text queries into expressions safe for the store's
//! FTS5 backend. Grammars are deterministic: the same input always yields
//! the same normalized output, and normalization is idempotent.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod german;
pub mod nordic;
pub mod query;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use german::GermanGrammar;
pub use nordic::NorwegianGrammar;
pub use nordic::SwedishGrammar;
pub use query::CompiledQuery;
pub use query::compile_fts_query;

use lexgate_core::CitationStyle;
use lexgate_core::ParsedCitation;

/// A jurisdiction-specific citation grammar.
///
/// # Invariants
/// - `parse` is total: unsupported input returns `None`, never panics.
/// - `parse(format(parse(s), Default))` equals `parse(s)` for all parsing
///   inputs `s`.
pub trait CitationGrammar: Send + Sync {
    /// Parses a citation string into its structured record.
    fn parse(&self, input: &str) -> Option<ParsedCitation>;

    /// Renders a parsed citation in the requested style.
    ///
    /// The default rendering is the normalized form for every style;
    /// grammars with subdivision tails override `Short`.
    fn format(&self, citation: &ParsedCitation, style: CitationStyle) -> String {
        let _ = style;
        citation.normalized.clone()
    }
}
