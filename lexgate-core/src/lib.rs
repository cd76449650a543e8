// lexgate-core/src/lib.rs
// ============================================================================
// Module: Lexgate Core Library
// Description: Public API surface for the Lexgate retrieval core.
// Purpose: Expose the data model, adapter interface, and registry.
// Dependencies: crate::{adapter, capability, citation, document, envelope,
//               eu, registry, tooling}
// ============================================================================

//! ## Overview
//! Lexgate core defines the shared vocabulary of the retrieval core: the
//! document model, parsed citations, EU cross-references, capability sets,
//! the jurisdiction adapter interface, and the case-insensitive adapter
//! registry. It is transport-agnostic; the tool router and the store build
//! on these types without this crate depending on either.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod adapter;
pub mod capability;
pub mod citation;
pub mod document;
pub mod envelope;
pub mod eu;
pub mod registry;
pub mod tooling;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use adapter::AdapterError;
pub use adapter::CaseLawRequest;
pub use adapter::CitationStyle;
pub use adapter::ComplianceReport;
pub use adapter::ComplianceStatus;
pub use adapter::CurrencyEvidence;
pub use adapter::CurrencyReport;
pub use adapter::CurrencyRequest;
pub use adapter::CurrencyStatus;
pub use adapter::DocumentPage;
pub use adapter::EuBasisRequest;
pub use adapter::EuImplementationPage;
pub use adapter::EuImplementationSummary;
pub use adapter::EuReferencePage;
pub use adapter::FormatReport;
pub use adapter::IngestionReport;
pub use adapter::IngestionRequest;
pub use adapter::JurisdictionAdapter;
pub use adapter::LegalStanceReport;
pub use adapter::LegalStanceRequest;
pub use adapter::ParseReport;
pub use adapter::PreparatoryWorksRequest;
pub use adapter::SearchRequest;
pub use adapter::ValidationReport;
pub use capability::AdapterCapabilities;
pub use capability::AdapterDescriptor;
pub use capability::CapabilitySet;
pub use capability::DataCapability;
pub use capability::SourceDescriptor;
pub use capability::StaticCapability;
pub use citation::CitationKind;
pub use citation::ParsedCitation;
pub use document::Document;
pub use document::DocumentKind;
pub use document::Metadata;
pub use document::scalar_metadata;
pub use envelope::ToolErrorCode;
pub use envelope::ToolFailure;
pub use envelope::ToolResult;
pub use eu::EuActType;
pub use eu::EuReference;
pub use registry::AdapterRegistry;
pub use registry::RegistryError;
pub use tooling::ToolName;
