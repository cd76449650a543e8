// lexgate-store-sqlite/src/lib.rs
// ============================================================================
// Module: Lexgate SQLite Store Library
// Description: Read-only corpus store over SQLite FTS5.
// Purpose: Expose typed retrieval with capability probing and three tiers.
// Dependencies: lexgate-core, lexgate-grammar, rusqlite
// ============================================================================

//! ## Overview
//! The store opens the corpus database read-only, probes which tables the
//! snapshot carries, and serves deterministic three-tier searches (exact
//! citation, ranked full text, substring fallback) over statutes, case
//! law, and preparatory works. A missing database file is not an error:
//! every read then returns [`Availability::Unavailable`] so adapters can
//! fall back to seed data. An empty result set from an existing table is
//! `Ready` and empty, never `Unavailable`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod rows;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::Availability;
pub use store::CorpusMetadata;
pub use store::CorpusStore;
pub use store::StoreConfig;
pub use store::StoreError;
pub use store::TableCounts;
