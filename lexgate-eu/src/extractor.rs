// lexgate-eu/src/extractor.rs
// ============================================================================
// Module: EU Reference Extractor
// Description: Ordered detectors for EU act identifiers in document text.
// Purpose: Yield normalized EU identifiers with per-detector confidence.
// Dependencies: lexgate-core, regex
// ============================================================================

//! ## Overview
//! Five detectors run in order over the document's searchable text: CELEX,
//! typed prefix, typed suffix, generic prefix, generic suffix. A span
//! matched by an earlier detector suppresses overlapping later matches, so
//! `Richtlinie (EU) 2016/679` yields one directive reference rather than a
//! directive plus a generic act. Per-document results are deduplicated by
//! `(eu_id, eu_type)`, keeping the highest-confidence match.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::OnceLock;

use lexgate_core::Document;
use lexgate_core::EuActType;
use lexgate_core::EuReference;
use regex::Regex;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Confidence for CELEX matches.
const CELEX_CONFIDENCE: f64 = 0.99;
/// Confidence for typed-prefix matches.
const TYPED_PREFIX_CONFIDENCE: f64 = 0.95;
/// Confidence for typed-suffix matches.
const TYPED_SUFFIX_CONFIDENCE: f64 = 0.94;
/// Confidence for generic-prefix matches.
const GENERIC_PREFIX_CONFIDENCE: f64 = 0.90;
/// Confidence for generic-suffix matches.
const GENERIC_SUFFIX_CONFIDENCE: f64 = 0.89;
/// Context window radius in characters.
const CONTEXT_RADIUS: usize = 90;

/// CELEX identifier: sector 3, year, type letter, four-digit number.
const CELEX_PATTERN: &str = r"(?i)\b(?:celex\s*:\s*)?3([0-9]{4})([rldc])([0-9]{4})\b";
/// Act type followed by optional jurisdiction and `year/number`.
const TYPED_PREFIX_PATTERN: &str = r"(?i)\b(richtlinie|directive|verordnung|regulation|beschluss|decision)\s+\(?\s*(eu|eg|ewg)?\s*\)?\s*(?:nr\.?\s*)?([0-9]{1,4})/([0-9]{1,4})\b";
/// Act type followed by `year/number/jurisdiction`.
const TYPED_SUFFIX_PATTERN: &str = r"(?i)\b(richtlinie|directive|verordnung|regulation|beschluss|decision)\s+([0-9]{1,4})/([0-9]{1,4})/(eu|eg|ewg)\b";
/// Bare jurisdiction followed by `year/number`.
const GENERIC_PREFIX_PATTERN: &str =
    r"(?i)\(?\b(eu|eg|ewg)\b\)?\s*(?:nr\.?\s*)?([0-9]{1,4})/([0-9]{1,4})\b";
/// Bare `year/number/jurisdiction`.
const GENERIC_SUFFIX_PATTERN: &str = r"(?i)\b([0-9]{1,4})/([0-9]{1,4})/(eu|eg|ewg)\b";

fn celex_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CELEX_PATTERN).expect("celex pattern compiles"))
}

fn typed_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TYPED_PREFIX_PATTERN).expect("typed prefix pattern compiles"))
}

fn typed_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TYPED_SUFFIX_PATTERN).expect("typed suffix pattern compiles"))
}

fn generic_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GENERIC_PREFIX_PATTERN).expect("generic prefix pattern compiles"))
}

fn generic_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GENERIC_SUFFIX_PATTERN).expect("generic suffix pattern compiles"))
}

// ============================================================================
// SECTION: Detected Reference
// ============================================================================

/// One detector hit before provenance is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedReference {
    /// Normalized EU identifier (`<JUR> <year>/<number>`).
    pub eu_id: String,
    /// Detected act type.
    pub eu_type: EuActType,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
    /// Text around the match, ±90 characters.
    pub context_snippet: String,
}

// ============================================================================
// SECTION: Extraction
// ============================================================================

/// Extracts EU references from free text.
///
/// Results are deduplicated by `(eu_id, eu_type)` keeping the
/// highest-confidence match, in first-detection order.
#[must_use]
pub fn extract_references(text: &str) -> Vec<DetectedReference> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut hits: Vec<DetectedReference> = Vec::new();

    detect_celex(&collapsed, &mut spans, &mut hits);
    detect_typed_prefix(&collapsed, &mut spans, &mut hits);
    detect_typed_suffix(&collapsed, &mut spans, &mut hits);
    detect_generic_prefix(&collapsed, &mut spans, &mut hits);
    detect_generic_suffix(&collapsed, &mut spans, &mut hits);

    dedupe_by_identity(hits)
}

/// Extracts EU references from a document, attaching provenance.
#[must_use]
pub fn extract_document_references(document: &Document) -> Vec<EuReference> {
    let statute_id = document
        .metadata
        .get("statute_id")
        .and_then(|value| value.as_str())
        .map(str::to_string);
    extract_references(&document.searchable_text())
        .into_iter()
        .map(|hit| EuReference {
            eu_id: hit.eu_id,
            eu_type: hit.eu_type,
            source_kind: document.kind,
            source_id: document.id.clone(),
            source_statute_id: statute_id.clone(),
            source_citation: document.citation.clone(),
            source_title: Some(document.title.clone()),
            source_url: document.source_url.clone(),
            context_snippet: Some(hit.context_snippet),
            confidence: hit.confidence,
        })
        .collect()
}

// ============================================================================
// SECTION: Detectors
// ============================================================================

fn detect_celex(text: &str, spans: &mut Vec<(usize, usize)>, hits: &mut Vec<DetectedReference>) {
    for captures in celex_re().captures_iter(text) {
        let whole = captures.get(0).map(|m| (m.start(), m.end()));
        let Some((start, end)) = whole else { continue };
        if overlaps(spans, start, end) {
            continue;
        }
        let (Some(year), Some(letter), Some(number)) =
            (captures.get(1), captures.get(2), captures.get(3))
        else {
            continue;
        };
        let eu_type = match letter.as_str().to_ascii_lowercase().as_str() {
            "r" => EuActType::Regulation,
            "l" => EuActType::Directive,
            "d" => EuActType::Decision,
            _ => EuActType::Act,
        };
        spans.push((start, end));
        hits.push(DetectedReference {
            eu_id: render_id("EU", year.as_str(), number.as_str()),
            eu_type,
            confidence: CELEX_CONFIDENCE,
            context_snippet: context_snippet(text, start, end),
        });
    }
}

fn detect_typed_prefix(
    text: &str,
    spans: &mut Vec<(usize, usize)>,
    hits: &mut Vec<DetectedReference>,
) {
    for captures in typed_prefix_re().captures_iter(text) {
        let Some(whole) = captures.get(0) else { continue };
        let (start, end) = (whole.start(), whole.end());
        if overlaps(spans, start, end) {
            continue;
        }
        // A missing jurisdiction followed by `/EU` etc. is the suffix
        // form; leave it to the suffix detector.
        if captures.get(2).is_none() && text[end ..].starts_with('/') {
            continue;
        }
        let (Some(kind), Some(year), Some(number)) =
            (captures.get(1), captures.get(3), captures.get(4))
        else {
            continue;
        };
        let jurisdiction = captures
            .get(2)
            .map_or_else(|| "EU".to_string(), |m| m.as_str().to_uppercase());
        spans.push((start, end));
        hits.push(DetectedReference {
            eu_id: render_id(&jurisdiction, year.as_str(), number.as_str()),
            eu_type: typed_act(kind.as_str()),
            confidence: TYPED_PREFIX_CONFIDENCE,
            context_snippet: context_snippet(text, start, end),
        });
    }
}

fn detect_typed_suffix(
    text: &str,
    spans: &mut Vec<(usize, usize)>,
    hits: &mut Vec<DetectedReference>,
) {
    for captures in typed_suffix_re().captures_iter(text) {
        let Some(whole) = captures.get(0) else { continue };
        let (start, end) = (whole.start(), whole.end());
        if overlaps(spans, start, end) {
            continue;
        }
        let (Some(kind), Some(year), Some(number), Some(jurisdiction)) =
            (captures.get(1), captures.get(2), captures.get(3), captures.get(4))
        else {
            continue;
        };
        spans.push((start, end));
        hits.push(DetectedReference {
            eu_id: render_id(&jurisdiction.as_str().to_uppercase(), year.as_str(), number.as_str()),
            eu_type: typed_act(kind.as_str()),
            confidence: TYPED_SUFFIX_CONFIDENCE,
            context_snippet: context_snippet(text, start, end),
        });
    }
}

fn detect_generic_prefix(
    text: &str,
    spans: &mut Vec<(usize, usize)>,
    hits: &mut Vec<DetectedReference>,
) {
    for captures in generic_prefix_re().captures_iter(text) {
        let Some(whole) = captures.get(0) else { continue };
        let (start, end) = (whole.start(), whole.end());
        if overlaps(spans, start, end) {
            continue;
        }
        let (Some(jurisdiction), Some(year), Some(number)) =
            (captures.get(1), captures.get(2), captures.get(3))
        else {
            continue;
        };
        spans.push((start, end));
        hits.push(DetectedReference {
            eu_id: render_id(&jurisdiction.as_str().to_uppercase(), year.as_str(), number.as_str()),
            eu_type: EuActType::Act,
            confidence: GENERIC_PREFIX_CONFIDENCE,
            context_snippet: context_snippet(text, start, end),
        });
    }
}

fn detect_generic_suffix(
    text: &str,
    spans: &mut Vec<(usize, usize)>,
    hits: &mut Vec<DetectedReference>,
) {
    for captures in generic_suffix_re().captures_iter(text) {
        let Some(whole) = captures.get(0) else { continue };
        let (start, end) = (whole.start(), whole.end());
        if overlaps(spans, start, end) {
            continue;
        }
        let (Some(year), Some(number), Some(jurisdiction)) =
            (captures.get(1), captures.get(2), captures.get(3))
        else {
            continue;
        };
        spans.push((start, end));
        hits.push(DetectedReference {
            eu_id: render_id(&jurisdiction.as_str().to_uppercase(), year.as_str(), number.as_str()),
            eu_type: EuActType::Act,
            confidence: GENERIC_SUFFIX_CONFIDENCE,
            context_snippet: context_snippet(text, start, end),
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a typed keyword to its act type.
fn typed_act(keyword: &str) -> EuActType {
    match keyword.to_ascii_lowercase().as_str() {
        "richtlinie" | "directive" => EuActType::Directive,
        "verordnung" | "regulation" => EuActType::Regulation,
        "beschluss" | "decision" => EuActType::Decision,
        _ => EuActType::Act,
    }
}

/// Renders the normalized identifier with a zero-stripped number part.
fn render_id(jurisdiction: &str, year: &str, number: &str) -> String {
    let number = number.trim_start_matches('0');
    let number = if number.is_empty() { "0" } else { number };
    format!("{jurisdiction} {year}/{number}")
}

/// Returns true when `[start, end)` overlaps a recorded span.
fn overlaps(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|(span_start, span_end)| start < *span_end && *span_start < end)
}

/// Cuts ±90 characters around a match on char boundaries.
fn context_snippet(text: &str, start: usize, end: usize) -> String {
    let mut from = start.saturating_sub(CONTEXT_RADIUS);
    while from > 0 && !text.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = (end + CONTEXT_RADIUS).min(text.len());
    while to < text.len() && !text.is_char_boundary(to) {
        to += 1;
    }
    text[from .. to].to_string()
}

/// Deduplicates hits by `(eu_id, eu_type)` keeping the best confidence.
fn dedupe_by_identity(hits: Vec<DetectedReference>) -> Vec<DetectedReference> {
    let mut kept: Vec<DetectedReference> = Vec::new();
    let mut index: BTreeMap<(String, String), usize> = BTreeMap::new();
    for hit in hits {
        let key = (hit.eu_id.to_lowercase(), hit.eu_type.as_str().to_string());
        match index.get(&key) {
            Some(position) => {
                if hit.confidence > kept[*position].confidence {
                    kept[*position] = hit;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(hit);
            }
        }
    }
    kept
}

// ============================================================================
// SECTION: Tests
// ============================================================================
