// lexgate-mcp/src/nordics.rs
// ============================================================================
// Module: Nordic Adapters
// Description: Citation-only adapters for Sweden and Norway.
// Purpose: Demonstrate the citation-only static contract.
// Dependencies: lexgate-core, lexgate-grammar
// ============================================================================

//! ## Overview
//! Sweden and Norway register with the citation-only contract: parse,
//! validate, and format work through their regex grammars, every other
//! operation family stays statically unsupported and is never dispatched.
//! Without a corpus there is no runtime capability either, so validation
//! is format-only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use lexgate_core::AdapterCapabilities;
use lexgate_core::AdapterDescriptor;
use lexgate_core::AdapterError;
use lexgate_core::CapabilitySet;
use lexgate_core::CitationStyle;
use lexgate_core::FormatReport;
use lexgate_core::JurisdictionAdapter;
use lexgate_core::ParseReport;
use lexgate_core::SourceDescriptor;
use lexgate_core::ValidationReport;
use lexgate_grammar::CitationGrammar;
use lexgate_grammar::NorwegianGrammar;
use lexgate_grammar::SwedishGrammar;

// ============================================================================
// SECTION: Shared Citation Operations
// ============================================================================

fn parse_with(
    grammar: &dyn CitationGrammar,
    citation: &str,
) -> Result<Option<ParseReport>, AdapterError> {
    Ok(grammar.parse(citation).map(|parsed| ParseReport {
        original: citation.to_string(),
        normalized: parsed.normalized.clone(),
        parsed: parsed.parsed,
    }))
}

fn validate_with(
    grammar: &dyn CitationGrammar,
    citation: &str,
) -> Result<ValidationReport, AdapterError> {
    match grammar.parse(citation) {
        Some(parsed) => Ok(ValidationReport {
            valid: true,
            normalized: Some(parsed.normalized),
            reason: None,
        }),
        None => Ok(ValidationReport {
            valid: false,
            normalized: None,
            reason: Some("unrecognized citation format".to_string()),
        }),
    }
}

fn format_with(
    grammar: &dyn CitationGrammar,
    citation: &str,
    style: CitationStyle,
) -> Result<FormatReport, AdapterError> {
    match grammar.parse(citation) {
        Some(parsed) => Ok(FormatReport {
            original: citation.to_string(),
            formatted: grammar.format(&parsed, style),
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

// ============================================================================
// SECTION: Sweden
// ============================================================================

/// Swedish citation-only adapter.
pub struct SwedenAdapter {
    /// Static adapter descriptor.
    descriptor: AdapterDescriptor,
    /// SFS gazette grammar.
    grammar: SwedishGrammar,
}

impl SwedenAdapter {
    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: AdapterDescriptor {
                jurisdiction_code: "se".to_string(),
                name: "Sweden".to_string(),
                default_language: "sv".to_string(),
                sources: vec![SourceDescriptor {
                    id: "svensk-forfattningssamling".to_string(),
                    name: "Svensk författningssamling".to_string(),
                    url: "https://svenskforfattningssamling.se".to_string(),
                }],
            },
            grammar: SwedishGrammar::new(),
        }
    }
}

impl Default for SwedenAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl JurisdictionAdapter for SwedenAdapter {
    fn descriptor(&self) -> &AdapterDescriptor {
        &self.descriptor
    }

    fn capabilities(&self) -> AdapterCapabilities {
        AdapterCapabilities::citations_only()
    }

    fn data_capabilities(&self) -> CapabilitySet {
        CapabilitySet::empty()
    }

    fn parse_citation(&self, citation: &str) -> Result<Option<ParseReport>, AdapterError> {
        parse_with(&self.grammar, citation)
    }

    fn validate_citation(&self, citation: &str) -> Result<ValidationReport, AdapterError> {
        validate_with(&self.grammar, citation)
    }

    fn format_citation(
        &self,
        citation: &str,
        style: CitationStyle,
    ) -> Result<FormatReport, AdapterError> {
        format_with(&self.grammar, citation, style)
    }
}

// ============================================================================
// SECTION: Norway
// ============================================================================

/// Norwegian citation-only adapter.
pub struct NorwayAdapter {
    /// Static adapter descriptor.
    descriptor: AdapterDescriptor,
    /// LOV identifier grammar.
    grammar: NorwegianGrammar,
}

impl NorwayAdapter {
    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: AdapterDescriptor {
                jurisdiction_code: "no".to_string(),
                name: "Norway".to_string(),
                default_language: "nb".to_string(),
                sources: vec![SourceDescriptor {
                    id: "lovdata".to_string(),
                    name: "Lovdata".to_string(),
                    url: "https://lovdata.no".to_string(),
                }],
            },
            grammar: NorwegianGrammar::new(),
        }
    }
}

impl Default for NorwayAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl JurisdictionAdapter for NorwayAdapter {
    fn descriptor(&self) -> &AdapterDescriptor {
        &self.descriptor
    }

    fn capabilities(&self) -> AdapterCapabilities {
        AdapterCapabilities::citations_only()
    }

    fn data_capabilities(&self) -> CapabilitySet {
        CapabilitySet::empty()
    }

    fn parse_citation(&self, citation: &str) -> Result<Option<ParseReport>, AdapterError> {
        parse_with(&self.grammar, citation)
    }

    fn validate_citation(&self, citation: &str) -> Result<ValidationReport, AdapterError> {
        validate_with(&self.grammar, citation)
    }

    fn format_citation(
        &self,
        citation: &str,
        style: CitationStyle,
    ) -> Result<FormatReport, AdapterError> {
        format_with(&self.grammar, citation, style)
    }
}
