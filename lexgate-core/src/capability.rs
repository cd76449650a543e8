// lexgate-core/src/capability.rs
// ============================================================================
// Module: Capability Model
// Description: Static adapter contracts and runtime data capabilities.
// Purpose: Separate what an adapter promises from what the corpus provides.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Two capability layers govern tool dispatch. [`AdapterCapabilities`] is
//! the static contract an adapter registers with; it never changes at
//! runtime. [`CapabilitySet`] is the runtime availability derived from the
//! corpus snapshot: which indexed tables actually exist. The shell gates
//! on the contract first and the availability second.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Data Capabilities
// ============================================================================

/// Closed vocabulary of runtime-detected corpus features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCapability {
    /// Consolidated federal legislation is present.
    CoreLegislation,
    /// A baseline case-law table is present.
    BasicCaseLaw,
    /// Documents can be scanned for EU cross-references.
    EuReferences,
    /// An expanded case-law table is present.
    ExpandedCaseLaw,
    /// Full preparatory works are present.
    FullPreparatoryWorks,
    /// Agency guidance documents are present.
    AgencyGuidance,
}

impl DataCapability {
    /// Returns the stable serialized label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoreLegislation => "core_legislation",
            Self::BasicCaseLaw => "basic_case_law",
            Self::EuReferences => "eu_references",
            Self::ExpandedCaseLaw => "expanded_case_law",
            Self::FullPreparatoryWorks => "full_preparatory_works",
            Self::AgencyGuidance => "agency_guidance",
        }
    }

    /// Returns all capabilities in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CoreLegislation,
            Self::BasicCaseLaw,
            Self::EuReferences,
            Self::ExpandedCaseLaw,
            Self::FullPreparatoryWorks,
            Self::AgencyGuidance,
        ]
    }
}

/// Runtime capability set derived from the corpus snapshot.
///
/// # Invariants
/// - Derived once per store open and immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    /// Present capabilities in canonical order.
    capabilities: BTreeSet<DataCapability>,
}

impl CapabilitySet {
    /// Creates an empty capability set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            capabilities: BTreeSet::new(),
        }
    }

    /// Creates a set from the given capabilities.
    #[must_use]
    pub fn from_capabilities(capabilities: impl IntoIterator<Item = DataCapability>) -> Self {
        Self {
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Adds a capability.
    pub fn insert(&mut self, capability: DataCapability) {
        self.capabilities.insert(capability);
    }

    /// Returns true when the capability is present.
    #[must_use]
    pub fn contains(&self, capability: DataCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Returns true when no capability is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Returns the stable labels of the present capabilities.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.capabilities.iter().map(|capability| capability.as_str()).collect()
    }

    /// Iterates the present capabilities in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = DataCapability> + '_ {
        self.capabilities.iter().copied()
    }
}

// ============================================================================
// SECTION: Static Contract
// ============================================================================

/// Operation families an adapter can statically support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticCapability {
    /// Statute search and by-id lookup.
    Documents,
    /// Case-law search.
    CaseLaw,
    /// Preparatory-works search.
    PreparatoryWorks,
    /// Citation parsing and validation.
    Citations,
    /// Citation formatting.
    Formatting,
    /// Currency checks.
    Currency,
    /// Legal-stance aggregation.
    LegalStance,
    /// EU linkage tool family.
    Eu,
    /// Ingestion runner.
    Ingestion,
}

/// Static capability flags forming the adapter contract.
///
/// # Invariants
/// - Flags are fixed at registration time; unset operations are never
///   dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterCapabilities {
    /// Statute search and by-id lookup.
    pub documents: bool,
    /// Case-law search.
    pub case_law: bool,
    /// Preparatory-works search.
    pub preparatory_works: bool,
    /// Citation parsing and validation.
    pub citations: bool,
    /// Citation formatting.
    pub formatting: bool,
    /// Currency checks.
    pub currency: bool,
    /// Legal-stance aggregation.
    pub legal_stance: bool,
    /// EU linkage tool family.
    pub eu: bool,
    /// Ingestion runner.
    pub ingestion: bool,
}

impl AdapterCapabilities {
    /// Full contract: every operation family supported.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            documents: true,
            case_law: true,
            preparatory_works: true,
            citations: true,
            formatting: true,
            currency: true,
            legal_stance: true,
            eu: true,
            ingestion: true,
        }
    }

    /// Citation-only contract used by the regex-grammar jurisdictions.
    #[must_use]
    pub const fn citations_only() -> Self {
        Self {
            documents: false,
            case_law: false,
            preparatory_works: false,
            citations: true,
            formatting: true,
            currency: false,
            legal_stance: false,
            eu: false,
            ingestion: false,
        }
    }

    /// Returns true when the static flag for the family is set.
    #[must_use]
    pub const fn allows(self, capability: StaticCapability) -> bool {
        match capability {
            StaticCapability::Documents => self.documents,
            StaticCapability::CaseLaw => self.case_law,
            StaticCapability::PreparatoryWorks => self.preparatory_works,
            StaticCapability::Citations => self.citations,
            StaticCapability::Formatting => self.formatting,
            StaticCapability::Currency => self.currency,
            StaticCapability::LegalStance => self.legal_stance,
            StaticCapability::Eu => self.eu,
            StaticCapability::Ingestion => self.ingestion,
        }
    }
}

// ============================================================================
// SECTION: Descriptor
// ============================================================================

/// A primary source the adapter's corpus is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Stable source identifier (also the ingestion source id).
    pub id: String,
    /// Human-readable source name.
    pub name: String,
    /// Source landing URL.
    pub url: String,
}

/// Static description of a jurisdiction adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterDescriptor {
    /// ISO-style lowercase jurisdiction code.
    pub jurisdiction_code: String,
    /// Human-readable jurisdiction name.
    pub name: String,
    /// Default language of corpus content.
    pub default_language: String,
    /// Primary sources feeding the corpus.
    pub sources: Vec<SourceDescriptor>,
}
