// lexgate-grammar/src/query.rs
// ============================================================================
// Module: Full-Text Query Compiler
// Description: Compiles raw queries into FTS5-safe match expressions.
// Purpose: Keep backend parse failures out of the search path.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The compiler turns a raw query into a prefix-conjunctive `primary`
//! expression and, for multi-token input, a prefix-disjunctive `fallback`.
//! Double quotes are stripped; any token carrying reserved operator
//! characters is wrapped in quotes so the backend treats it as a literal.
//! The same input always produces the same output bytes.

/// Compiled full-text expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// Prefix-conjunctive expression (every token ANDed).
    pub primary: String,
    /// Prefix-disjunctive expression; absent for single-token input.
    pub fallback: Option<String>,
}

/// Compiles a raw query into FTS5 match expressions.
#[must_use]
pub fn compile_fts_query(raw: &str) -> CompiledQuery {
    let cleaned: String = raw.chars().filter(|ch| *ch != '"').collect();
    let terms: Vec<String> = cleaned.split_whitespace().map(prefix_term).collect();
    if terms.is_empty() {
        return CompiledQuery {
            primary: String::new(),
            fallback: None,
        };
    }
    let primary = terms.join(" AND ");
    let fallback = (terms.len() > 1).then(|| terms.join(" OR "));
    CompiledQuery {
        primary,
        fallback,
    }
}

/// Renders one token as a prefix term, quoting it when it carries
/// anything the backend could read as an operator.
fn prefix_term(token: &str) -> String {
    if token.chars().all(char::is_alphanumeric) {
        format!("{token}*")
    } else {
        format!("\"{token}\"*")
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
