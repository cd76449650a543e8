// lexgate-eu/src/matching.rs
// ============================================================================
// Module: EU Identifier Matching
// Description: Tolerant identifier comparison and implementation summaries.
// Purpose: Resolve user-supplied EU identifiers against extracted ones.
// Dependencies: lexgate-core
// ============================================================================

//! ## Overview
//! User-supplied EU identifiers arrive in many renderings: CELEX, typed,
//! with or without a jurisdiction prefix. Matching normalizes both sides
//! into the extractor's identifier space and treats identifiers as equal
//! when their normal forms agree, or agree once the jurisdiction prefix is
//! stripped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use lexgate_core::EuImplementationSummary;
use lexgate_core::EuReference;

use crate::extractor::extract_references;

// ============================================================================
// SECTION: Identifier Matching
// ============================================================================

/// Normalizes a user-supplied EU identifier.
///
/// Runs the extractor over the input and takes the first detection; input
/// no detector recognizes (for example a bare `2016/679`) normalizes to
/// its trimmed form.
#[must_use]
pub fn normalize_identifier(raw: &str) -> String {
    extract_references(raw)
        .into_iter()
        .next()
        .map_or_else(|| raw.trim().to_string(), |hit| hit.eu_id)
}

/// Strips a leading `EU` / `EG` / `EWG` jurisdiction prefix.
#[must_use]
pub fn strip_jurisdiction(identifier: &str) -> &str {
    for prefix in ["EU ", "EG ", "EWG ", "eu ", "eg ", "ewg "] {
        if let Some(stripped) = identifier.strip_prefix(prefix) {
            return stripped;
        }
    }
    identifier
}

/// Returns true when two identifiers refer to the same act.
///
/// Identifiers match when their fully normalized forms are equal, or when
/// they are equal after stripping the jurisdiction prefix. This tolerates
/// `EU 2016/679` against `2016/679` and resolves CELEX into the same
/// space.
#[must_use]
pub fn identifiers_match(left: &str, right: &str) -> bool {
    let left = normalize_identifier(left);
    let right = normalize_identifier(right);
    if left.eq_ignore_ascii_case(&right) {
        return true;
    }
    strip_jurisdiction(&left).eq_ignore_ascii_case(strip_jurisdiction(&right))
}

// ============================================================================
// SECTION: Implementation Summaries
// ============================================================================

/// Groups references into per-act implementation summaries.
///
/// Summaries count distinct source documents per `(eu_id, eu_type)` and
/// list the distinct implementing statutes sorted. Results order by
/// implementation count descending, then identifier ascending.
#[must_use]
pub fn summarize_implementations(references: &[EuReference]) -> Vec<EuImplementationSummary> {
    let mut groups: BTreeMap<(String, String), (BTreeSet<String>, BTreeSet<String>)> =
        BTreeMap::new();
    for reference in references {
        let key = (reference.eu_id.clone(), reference.eu_type.as_str().to_string());
        let (sources, statutes) = groups.entry(key).or_default();
        sources.insert(reference.source_id.clone());
        if let Some(statute_id) = &reference.source_statute_id {
            statutes.insert(statute_id.clone());
        }
    }
    let mut summaries: Vec<EuImplementationSummary> = groups
        .into_iter()
        .map(|((eu_id, eu_type), (sources, statutes))| EuImplementationSummary {
            eu_id,
            eu_type,
            implementation_count: sources.len(),
            statute_ids: statutes.into_iter().collect(),
        })
        .collect();
    summaries.sort_by(|left, right| {
        right
            .implementation_count
            .cmp(&left.implementation_count)
            .then_with(|| left.eu_id.cmp(&right.eu_id))
    });
    summaries
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
