// lexgate-mcp/src/lib.rs
// ============================================================================
// Module: Lexgate MCP Library
// Description: Tool router, adapters, and transport edge for Lexgate.
// Purpose: Dispatch typed tool calls to jurisdiction adapters.
// Dependencies: lexgate-core, lexgate-grammar, lexgate-eu,
//               lexgate-store-sqlite
// ============================================================================

//! ## Overview
//! This crate binds the retrieval core together: the shell validates and
//! routes tool calls, the German adapter wires the SQLite store, the
//! citation grammar, and the EU extractor behind the uniform adapter
//! interface, and the Nordic adapters demonstrate the citation-only
//! contract. The stdio loop at the edge frames one JSON tool call per
//! line; the core itself never depends on a transport.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod config;
pub mod germany;
pub mod ingestion;
pub mod nordics;
pub mod seed;
pub mod server;
pub mod telemetry;
pub mod tools;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ToolAuditEvent;
pub use config::ConfigError;
pub use config::ServerConfig;
pub use germany::GermanyAdapter;
pub use ingestion::IngestionRunner;
pub use nordics::NorwayAdapter;
pub use nordics::SwedenAdapter;
pub use server::ServeError;
pub use server::build_registry;
pub use server::serve_stdio;
pub use telemetry::LATENCY_BUCKETS_MS;
pub use telemetry::MetricEvent;
pub use telemetry::Metrics;
pub use telemetry::NoopMetrics;
pub use tools::ToolCall;
pub use tools::ToolRouter;
