// lexgate-core/src/tooling.rs
// ============================================================================
// Module: Tool Names
// Description: The closed tool-name set and its capability requirements.
// Purpose: Give the shell one authoritative dispatch vocabulary.
// Dependencies: lexgate-core::capability
// ============================================================================

//! ## Overview
//! [`ToolName`] enumerates every recognized tool. Each name knows whether
//! it is country-scoped, which static capability its adapter contract must
//! carry, and which runtime data capability gates it.

use serde::Deserialize;
use serde::Serialize;

use crate::capability::DataCapability;
use crate::capability::StaticCapability;

/// Closed set of recognized tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// List registered jurisdictions with their capabilities.
    ListCountries,
    /// Describe one jurisdiction's contract and tool availability.
    DescribeCountry,
    /// Three-tier statute search.
    SearchDocuments,
    /// By-id document lookup.
    GetDocument,
    /// Three-tier case-law search.
    SearchCaseLaw,
    /// Hint-driven preparatory-works search.
    GetPreparatoryWorks,
    /// Parse a citation string.
    ParseCitation,
    /// Validate citation format and corpus presence.
    ValidateCitation,
    /// Render a citation in a style.
    FormatCitation,
    /// Best-effort currency check.
    CheckCurrency,
    /// Aggregate statutes, case law, and preparatory works.
    BuildLegalStance,
    /// EU references of selected provisions.
    GetEuBasis,
    /// Search documents and summarize EU references.
    SearchEuImplementations,
    /// National provisions implementing an EU act.
    GetNationalImplementations,
    /// EU references of one provision.
    GetProvisionEuBasis,
    /// Check whether provisions map to an EU act.
    ValidateEuCompliance,
    /// Run an external ingestion command.
    RunIngestion,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListCountries => "list_countries",
            Self::DescribeCountry => "describe_country",
            Self::SearchDocuments => "search_documents",
            Self::GetDocument => "get_document",
            Self::SearchCaseLaw => "search_case_law",
            Self::GetPreparatoryWorks => "get_preparatory_works",
            Self::ParseCitation => "parse_citation",
            Self::ValidateCitation => "validate_citation",
            Self::FormatCitation => "format_citation",
            Self::CheckCurrency => "check_currency",
            Self::BuildLegalStance => "build_legal_stance",
            Self::GetEuBasis => "get_eu_basis",
            Self::SearchEuImplementations => "search_eu_implementations",
            Self::GetNationalImplementations => "get_national_implementations",
            Self::GetProvisionEuBasis => "get_provision_eu_basis",
            Self::ValidateEuCompliance => "validate_eu_compliance",
            Self::RunIngestion => "run_ingestion",
        }
    }

    /// Parses a canonical tool name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|tool| tool.as_str() == name)
    }

    /// Returns all tool names in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ListCountries,
            Self::DescribeCountry,
            Self::SearchDocuments,
            Self::GetDocument,
            Self::SearchCaseLaw,
            Self::GetPreparatoryWorks,
            Self::ParseCitation,
            Self::ValidateCitation,
            Self::FormatCitation,
            Self::CheckCurrency,
            Self::BuildLegalStance,
            Self::GetEuBasis,
            Self::SearchEuImplementations,
            Self::GetNationalImplementations,
            Self::GetProvisionEuBasis,
            Self::ValidateEuCompliance,
            Self::RunIngestion,
        ]
    }

    /// Returns true when the tool resolves a jurisdiction adapter.
    #[must_use]
    pub const fn is_country_scoped(self) -> bool {
        !matches!(self, Self::ListCountries)
    }

    /// Returns the static capability the adapter contract must carry.
    ///
    /// `list_countries` and `describe_country` inspect the contract only
    /// and require no capability themselves.
    #[must_use]
    pub const fn static_capability(self) -> Option<StaticCapability> {
        match self {
            Self::ListCountries | Self::DescribeCountry => None,
            Self::SearchDocuments | Self::GetDocument => Some(StaticCapability::Documents),
            Self::SearchCaseLaw => Some(StaticCapability::CaseLaw),
            Self::GetPreparatoryWorks => Some(StaticCapability::PreparatoryWorks),
            Self::ParseCitation | Self::ValidateCitation => Some(StaticCapability::Citations),
            Self::FormatCitation => Some(StaticCapability::Formatting),
            Self::CheckCurrency => Some(StaticCapability::Currency),
            Self::BuildLegalStance => Some(StaticCapability::LegalStance),
            Self::GetEuBasis
            | Self::SearchEuImplementations
            | Self::GetNationalImplementations
            | Self::GetProvisionEuBasis
            | Self::ValidateEuCompliance => Some(StaticCapability::Eu),
            Self::RunIngestion => Some(StaticCapability::Ingestion),
        }
    }

    /// Returns the runtime capability that gates the tool, when any.
    ///
    /// Statute search and by-id lookup always answer (seed fallback), so
    /// only the case-law, preparatory-works, and EU families are gated.
    #[must_use]
    pub const fn runtime_capability(self) -> Option<DataCapability> {
        match self {
            Self::SearchCaseLaw => Some(DataCapability::BasicCaseLaw),
            Self::GetPreparatoryWorks => Some(DataCapability::FullPreparatoryWorks),
            Self::GetEuBasis
            | Self::SearchEuImplementations
            | Self::GetNationalImplementations
            | Self::GetProvisionEuBasis
            | Self::ValidateEuCompliance => Some(DataCapability::EuReferences),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
