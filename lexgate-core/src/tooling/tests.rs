// lexgate-core/src/tooling/tests.rs
// ============================================================================
// Module: Tool Name Unit Tests
// Description: Unit tests for the closed tool-name set.
// Purpose: Validate name round-trips and capability requirements.
// Dependencies: lexgate-core
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use crate::capability::DataCapability;
use crate::capability::StaticCapability;

use super::ToolName;

#[test]
fn names_round_trip_through_parse() {
    for tool in ToolName::all() {
        assert_eq!(ToolName::parse(tool.as_str()), Some(*tool));
    }
}

#[test]
fn unknown_name_does_not_parse() {
    assert_eq!(ToolName::parse("search_statutes"), None);
    assert_eq!(ToolName::parse(""), None);
}

#[test]
fn only_list_countries_is_global() {
    for tool in ToolName::all() {
        let scoped = tool.is_country_scoped();
        assert_eq!(scoped, !matches!(tool, ToolName::ListCountries));
    }
}

#[test]
fn eu_family_requires_eu_capability() {
    for tool in [
        ToolName::GetEuBasis,
        ToolName::SearchEuImplementations,
        ToolName::GetNationalImplementations,
        ToolName::GetProvisionEuBasis,
        ToolName::ValidateEuCompliance,
    ] {
        assert!(matches!(tool.static_capability(), Some(StaticCapability::Eu)));
        assert_eq!(tool.runtime_capability(), Some(DataCapability::EuReferences));
    }
}

#[test]
fn statute_lookup_is_not_runtime_gated() {
    assert_eq!(ToolName::SearchDocuments.runtime_capability(), None);
    assert_eq!(ToolName::GetDocument.runtime_capability(), None);
    assert_eq!(
        ToolName::SearchCaseLaw.runtime_capability(),
        Some(DataCapability::BasicCaseLaw)
    );
    assert_eq!(
        ToolName::GetPreparatoryWorks.runtime_capability(),
        Some(DataCapability::FullPreparatoryWorks)
    );
}
