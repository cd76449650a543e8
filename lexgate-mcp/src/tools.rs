// lexgate-mcp/src/tools.rs
// ============================================================================
// Module: Tool Router
// Description: Typed dispatcher with validation and capability gating.
// Purpose: Route tool calls to adapters and return uniform envelopes.
// Dependencies: lexgate-core
// ============================================================================

//! ## Overview
//! The router recognizes the closed tool-name set, validates arguments
//! through the shared validation layer, resolves the adapter, enforces
//! static and runtime capability gating, and wraps every outcome in one
//! result envelope. Gated-but-absent data never raises an error: the
//! router substitutes an `ok:true` upgrade notice and fabricates nothing.
//! The router is stateless across calls; each invocation accumulates into
//! request-local state only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use lexgate_core::AdapterError;
use lexgate_core::AdapterRegistry;
use lexgate_core::CaseLawRequest;
use lexgate_core::CitationStyle;
use lexgate_core::CurrencyRequest;
use lexgate_core::DataCapability;
use lexgate_core::EuBasisRequest;
use lexgate_core::IngestionRequest;
use lexgate_core::JurisdictionAdapter;
use lexgate_core::LegalStanceRequest;
use lexgate_core::PreparatoryWorksRequest;
use lexgate_core::SearchRequest;
use lexgate_core::ToolErrorCode;
use lexgate_core::ToolFailure;
use lexgate_core::ToolName;
use lexgate_core::ToolResult;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::audit::AuditSink;
use crate::audit::ToolAuditEvent;
use crate::telemetry::MetricEvent;
use crate::telemetry::Metrics;
use crate::validation::Arguments;
use crate::validation::invalid;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default result cap for document and case-law searches.
const DEFAULT_LIMIT: usize = 20;
/// Default result cap for the EU linkage family.
const DEFAULT_EU_LIMIT: usize = 50;

// ============================================================================
// SECTION: Tool Call
// ============================================================================

/// One tool call as received from the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name.
    pub name: String,
    /// Argument object; null when omitted.
    #[serde(default)]
    pub arguments: Value,
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Typed tool dispatcher.
pub struct ToolRouter {
    /// Jurisdiction registry built at startup.
    registry: Arc<AdapterRegistry>,
    /// Audit sink receiving one event per call.
    audit: Arc<dyn AuditSink>,
    /// Metrics sink receiving one sample per call.
    metrics: Arc<dyn Metrics>,
}

impl ToolRouter {
    /// Creates a router over a built registry.
    #[must_use]
    pub fn new(
        registry: AdapterRegistry,
        audit: Arc<dyn AuditSink>,
        metrics: Arc<dyn Metrics>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            audit,
            metrics,
        }
    }

    /// Handles one tool call, returning exactly one envelope.
    #[must_use]
    pub fn handle_tool_call(&self, call: &ToolCall) -> ToolResult {
        let started = Instant::now();
        let tool = ToolName::parse(&call.name);
        let country = call
            .arguments
            .get("country")
            .and_then(Value::as_str)
            .map(|code| code.trim().to_lowercase());

        let outcome = match tool {
            Some(tool) => self.dispatch(tool, &call.arguments),
            None => Err(ToolFailure::new(
                ToolErrorCode::UnknownTool,
                format!("unknown tool: {}", call.name),
            )),
        };

        let duration_ms = started.elapsed().as_millis();
        let (envelope, error_code) = match outcome {
            Ok(data) => (ToolResult::success(call.name.clone(), data), None),
            Err(failure) => {
                let code = failure.code.as_str();
                (ToolResult::failure(call.name.clone(), failure), Some(code))
            }
        };

        self.audit.record(&ToolAuditEvent::new(
            call.name.clone(),
            country,
            envelope.ok,
            error_code,
            duration_ms,
        ));
        self.metrics.record(&MetricEvent {
            tool,
            outcome: error_code.unwrap_or("ok"),
            duration_ms,
        });
        envelope
    }

    // ========================================================================
    // SECTION: Dispatch
    // ========================================================================

    /// Dispatch order follows the shell contract: argument validation
    /// first, then adapter resolution, then static and runtime gating,
    /// then invocation.
    fn dispatch(&self, tool: ToolName, arguments: &Value) -> Result<Value, ToolFailure> {
        let args = Arguments::new(arguments)?;
        if !tool.is_country_scoped() {
            return self.handle_list_countries();
        }

        let code = args.required_str("country")?.to_lowercase();
        let request = parse_request(tool, &args)?;

        let adapter = self.registry.get(&code).ok_or_else(|| {
            ToolFailure::new(ToolErrorCode::UnknownCountry, format!("unknown country: {code}"))
        })?;

        if let Some(required) = tool.static_capability()
            && !adapter.capabilities().allows(required)
        {
            return Err(ToolFailure::new(
                ToolErrorCode::UnsupportedCapability,
                format!("{} is not supported for {code}", tool.as_str()),
            ));
        }

        if let Some(capability) = tool.runtime_capability()
            && !adapter.data_capabilities().contains(capability)
        {
            return Ok(upgrade_notice(capability, &code));
        }

        invoke(adapter.as_ref(), &code, request)
    }

    fn handle_list_countries(&self) -> Result<Value, ToolFailure> {
        let countries: Vec<Value> = self
            .registry
            .list()
            .iter()
            .map(|adapter| {
                json!({
                    "country": adapter.descriptor().jurisdiction_code.to_lowercase(),
                    "capabilities": adapter.capabilities(),
                    "dataCapabilities": adapter.data_capabilities().labels(),
                })
            })
            .collect();
        Ok(Value::Array(countries))
    }
}

// ============================================================================
// SECTION: Typed Requests
// ============================================================================

/// One validated tool request, parsed before gating.
enum ToolRequest {
    /// Describe one jurisdiction.
    DescribeCountry,
    /// Three-tier statute search.
    SearchDocuments(SearchRequest),
    /// By-id document lookup.
    GetDocument(String),
    /// Three-tier case-law search.
    SearchCaseLaw(CaseLawRequest),
    /// Hint-driven preparatory-works search.
    GetPreparatoryWorks(PreparatoryWorksRequest),
    /// Parse a citation.
    ParseCitation(String),
    /// Validate a citation.
    ValidateCitation(String),
    /// Format a citation.
    FormatCitation(String, CitationStyle),
    /// Currency check.
    CheckCurrency(CurrencyRequest),
    /// Legal-stance aggregation.
    BuildLegalStance(LegalStanceRequest),
    /// EU basis of selected provisions.
    GetEuBasis(EuBasisRequest),
    /// EU implementation search.
    SearchEuImplementations(String, usize),
    /// National implementations of an act.
    GetNationalImplementations(String, usize),
    /// EU basis of one provision.
    GetProvisionEuBasis(String, usize),
    /// Compliance mapping check.
    ValidateEuCompliance {
        /// EU identifier to check.
        eu_id: String,
        /// Optional citation selector.
        citation: Option<String>,
        /// Optional statute selector.
        statute_id: Option<String>,
    },
    /// External ingestion run.
    RunIngestion(IngestionRequest),
}

/// Validates per-tool arguments into a typed request.
fn parse_request(tool: ToolName, args: &Arguments<'_>) -> Result<ToolRequest, ToolFailure> {
    match tool {
        ToolName::ListCountries | ToolName::DescribeCountry => Ok(ToolRequest::DescribeCountry),
        ToolName::SearchDocuments => Ok(ToolRequest::SearchDocuments(SearchRequest {
            query: args.required_str("query")?.to_string(),
            limit: args.optional_limit("limit")?.unwrap_or(DEFAULT_LIMIT),
        })),
        ToolName::GetDocument => Ok(ToolRequest::GetDocument(args.required_str("id")?.to_string())),
        ToolName::SearchCaseLaw => Ok(ToolRequest::SearchCaseLaw(CaseLawRequest {
            query: args.required_str("query")?.to_string(),
            limit: args.optional_limit("limit")?.unwrap_or(DEFAULT_LIMIT),
            court: args.optional_str("court")?.map(str::to_string),
            date_from: args.optional_date("dateFrom")?.map(str::to_string),
            date_to: args.optional_date("dateTo")?.map(str::to_string),
        })),
        ToolName::GetPreparatoryWorks => {
            let request = PreparatoryWorksRequest {
                citation: args.optional_str("citation")?.map(str::to_string),
                statute_id: args.optional_str("statuteId")?.map(str::to_string),
                query: args.optional_str("query")?.map(str::to_string),
                limit: args.optional_limit("limit")?.unwrap_or(DEFAULT_LIMIT),
            };
            if request.citation.is_none() && request.statute_id.is_none() && request.query.is_none()
            {
                return Err(invalid("one of citation, statuteId, query is required"));
            }
            Ok(ToolRequest::GetPreparatoryWorks(request))
        }
        ToolName::ParseCitation => {
            Ok(ToolRequest::ParseCitation(args.required_str("citation")?.to_string()))
        }
        ToolName::ValidateCitation => {
            Ok(ToolRequest::ValidateCitation(args.required_str("citation")?.to_string()))
        }
        ToolName::FormatCitation => Ok(ToolRequest::FormatCitation(
            args.required_str("citation")?.to_string(),
            args.optional_style("style")?,
        )),
        ToolName::CheckCurrency => {
            let request = CurrencyRequest {
                citation: args.optional_str("citation")?.map(str::to_string),
                statute_id: args.optional_str("statuteId")?.map(str::to_string),
                as_of_date: args.optional_date("asOfDate")?.map(str::to_string),
            };
            if request.citation.is_none() && request.statute_id.is_none() {
                return Err(invalid("one of citation, statuteId is required"));
            }
            Ok(ToolRequest::CheckCurrency(request))
        }
        ToolName::BuildLegalStance => Ok(ToolRequest::BuildLegalStance(LegalStanceRequest {
            query: args.required_str("query")?.to_string(),
            limit: args.optional_limit("limit")?.unwrap_or(DEFAULT_LIMIT),
            include_case_law: args.optional_bool("includeCaseLaw")?.unwrap_or(true),
            include_preparatory_works: args
                .optional_bool("includePreparatoryWorks")?
                .unwrap_or(true),
        })),
        ToolName::GetEuBasis => {
            let request = EuBasisRequest {
                citation: args.optional_str("citation")?.map(str::to_string),
                statute_id: args.optional_str("statuteId")?.map(str::to_string),
                document_id: args.optional_str("documentId")?.map(str::to_string),
                limit: args.optional_limit("limit")?.unwrap_or(DEFAULT_EU_LIMIT),
            };
            if request.citation.is_none()
                && request.statute_id.is_none()
                && request.document_id.is_none()
            {
                return Err(invalid("one of citation, statuteId, documentId is required"));
            }
            Ok(ToolRequest::GetEuBasis(request))
        }
        ToolName::SearchEuImplementations => Ok(ToolRequest::SearchEuImplementations(
            args.required_str("query")?.to_string(),
            args.optional_limit("limit")?.unwrap_or(DEFAULT_EU_LIMIT),
        )),
        ToolName::GetNationalImplementations => Ok(ToolRequest::GetNationalImplementations(
            args.required_str("euId")?.to_string(),
            args.optional_limit("limit")?.unwrap_or(DEFAULT_EU_LIMIT),
        )),
        ToolName::GetProvisionEuBasis => Ok(ToolRequest::GetProvisionEuBasis(
            args.required_str("documentId")?.to_string(),
            args.optional_limit("limit")?.unwrap_or(DEFAULT_EU_LIMIT),
        )),
        ToolName::ValidateEuCompliance => Ok(ToolRequest::ValidateEuCompliance {
            eu_id: args.required_str("euId")?.to_string(),
            citation: args.optional_str("citation")?.map(str::to_string),
            statute_id: args.optional_str("statuteId")?.map(str::to_string),
        }),
        ToolName::RunIngestion => Ok(ToolRequest::RunIngestion(IngestionRequest {
            source_id: args.optional_str("sourceId")?.map(str::to_string),
            dry_run: args.optional_bool("dryRun")?.unwrap_or(false),
        })),
    }
}

/// Invokes the adapter operation for a validated request.
fn invoke(
    adapter: &dyn JurisdictionAdapter,
    code: &str,
    request: ToolRequest,
) -> Result<Value, ToolFailure> {
    match request {
        ToolRequest::DescribeCountry => describe_country(code, adapter),
        ToolRequest::SearchDocuments(request) => {
            to_value(adapter.search_documents(&request).map_err(adapter_failure)?)
        }
        ToolRequest::GetDocument(id) => {
            to_value(adapter.get_document(&id).map_err(adapter_failure)?)
        }
        ToolRequest::SearchCaseLaw(request) => {
            to_value(adapter.search_case_law(&request).map_err(adapter_failure)?)
        }
        ToolRequest::GetPreparatoryWorks(request) => {
            to_value(adapter.get_preparatory_works(&request).map_err(adapter_failure)?)
        }
        ToolRequest::ParseCitation(citation) => {
            to_value(adapter.parse_citation(&citation).map_err(adapter_failure)?)
        }
        ToolRequest::ValidateCitation(citation) => {
            to_value(adapter.validate_citation(&citation).map_err(adapter_failure)?)
        }
        ToolRequest::FormatCitation(citation, style) => {
            to_value(adapter.format_citation(&citation, style).map_err(adapter_failure)?)
        }
        ToolRequest::CheckCurrency(request) => {
            to_value(adapter.check_currency(&request).map_err(adapter_failure)?)
        }
        ToolRequest::BuildLegalStance(request) => {
            to_value(adapter.build_legal_stance(&request).map_err(adapter_failure)?)
        }
        ToolRequest::GetEuBasis(request) => {
            to_value(adapter.get_eu_basis(&request).map_err(adapter_failure)?)
        }
        ToolRequest::SearchEuImplementations(query, limit) => {
            to_value(adapter.search_eu_implementations(&query, limit).map_err(adapter_failure)?)
        }
        ToolRequest::GetNationalImplementations(eu_id, limit) => {
            to_value(adapter.get_national_implementations(&eu_id, limit).map_err(adapter_failure)?)
        }
        ToolRequest::GetProvisionEuBasis(document_id, limit) => {
            to_value(adapter.get_provision_eu_basis(&document_id, limit).map_err(adapter_failure)?)
        }
        ToolRequest::ValidateEuCompliance {
            eu_id,
            citation,
            statute_id,
        } => to_value(
            adapter
                .validate_eu_compliance(&eu_id, citation.as_deref(), statute_id.as_deref())
                .map_err(adapter_failure)?,
        ),
        ToolRequest::RunIngestion(request) => {
            to_value(adapter.run_ingestion(&request).map_err(adapter_failure)?)
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the describe_country payload.
fn describe_country(code: &str, adapter: &dyn JurisdictionAdapter) -> Result<Value, ToolFailure> {
    let capabilities = adapter.capabilities();
    let tools: serde_json::Map<String, Value> = ToolName::all()
        .iter()
        .filter(|tool| tool.is_country_scoped())
        .map(|tool| {
            let supported = tool
                .static_capability()
                .is_none_or(|required| capabilities.allows(required));
            (tool.as_str().to_string(), Value::Bool(supported))
        })
        .collect();
    Ok(json!({
        "country": code,
        "name": adapter.descriptor().name,
        "defaultLanguage": adapter.descriptor().default_language,
        "sources": adapter.descriptor().sources,
        "capabilities": capabilities,
        "dataCapabilities": adapter.data_capabilities().labels(),
        "tools": tools,
    }))
}

/// Upgrade notice substituted for gated-but-absent data.
fn upgrade_notice(capability: DataCapability, country: &str) -> Value {
    json!({
        "upgradeRequired": true,
        "capability": capability.as_str(),
        "country": country,
        "message": format!(
            "capability {} is not available in the current {country} corpus snapshot",
            capability.as_str()
        ),
    })
}

/// Maps adapter failures onto envelope error codes.
fn adapter_failure(error: AdapterError) -> ToolFailure {
    match error {
        AdapterError::InvalidArguments(message) => {
            ToolFailure::new(ToolErrorCode::InvalidArguments, message)
        }
        AdapterError::Unsupported(operation) => ToolFailure::new(
            ToolErrorCode::UnsupportedCapability,
            format!("operation not supported: {operation}"),
        ),
        AdapterError::Store(message) | AdapterError::Internal(message) => {
            ToolFailure::new(ToolErrorCode::InternalError, message)
        }
    }
}

/// Serializes a payload, mapping failures to internal errors.
fn to_value<T: Serialize>(payload: T) -> Result<Value, ToolFailure> {
    serde_json::to_value(payload).map_err(|err| {
        ToolFailure::new(ToolErrorCode::InternalError, format!("serialization failed: {err}"))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
