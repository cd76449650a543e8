// lexgate-grammar/src/german.rs
// ============================================================================
// Module: German Citation Grammar
// Description: Parser for German statute and article citations.
// Purpose: Normalize § / Art. citations and derive exact-match lookups.
// Dependencies: lexgate-core, regex
// ============================================================================

//! ## Overview
//! The German grammar recognizes two shapes, matched case-insensitively
//! over whitespace-collapsed input:
//!
//! - Paragraph form: one or two section markers, a section spec (numbers
//!   separated by comma, hyphen, or `bis`), an optional subdivision tail
//!   (`Abs.`, `S.`, `Nr.`, `Buchst.`), and a code abbreviation.
//! - Article form: `Art.` / `Artikel` plus the same tail and code.
//!
//! The marker normalizes to `§§` exactly when the section spec is a list
//! or range, otherwise to `§`. Lookup citations carry one single-marker
//! minimal form per section number so they join directly against stored
//! citations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::OnceLock;

use lexgate_core::CitationKind;
use lexgate_core::CitationStyle;
use lexgate_core::ParsedCitation;
use regex::Regex;

use crate::CitationGrammar;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Paragraph-form pattern over collapsed whitespace.
const PARAGRAPH_PATTERN: &str = r"(?ix)
    ^
    (?P<marker>§{1,2})
    \s*
    (?P<sections>[0-9]+[a-z]?(?:\s*(?:,|-|\bbis\b)\s*[0-9]+[a-z]?)*)
    (?:\s+(?:abs\.?|absatz)\s*(?P<paragraph>[0-9]+[a-z]?))?
    (?:\s+(?:s\.?|satz)\s*(?P<sentence>[0-9]+[a-z]?))?
    (?:\s+(?:nr\.?|nummer)\s*(?P<number>[0-9]+[a-z]?))?
    (?:\s+(?:buchst\.?|buchstabe)\s*(?P<letter>[a-z]))?
    \s+
    (?P<code>[a-zäöüß][a-z0-9äöüß]*)
    $";

/// Article-form pattern over collapsed whitespace.
const ARTICLE_PATTERN: &str = r"(?ix)
    ^
    (?:art\.?|artikel)
    \s*
    (?P<article>[0-9]+[a-z]?)
    (?:\s+(?:abs\.?|absatz)\s*(?P<paragraph>[0-9]+[a-z]?))?
    (?:\s+(?:s\.?|satz)\s*(?P<sentence>[0-9]+[a-z]?))?
    (?:\s+(?:nr\.?|nummer)\s*(?P<number>[0-9]+[a-z]?))?
    (?:\s+(?:buchst\.?|buchstabe)\s*(?P<letter>[a-z]))?
    \s+
    (?P<code>[a-zäöüß][a-z0-9äöüß]*)
    $";

/// Section-spec token pattern: numbers and separators in source order.
const SECTION_TOKEN_PATTERN: &str = r"(?i)[0-9]+[a-z]?|,|-|\bbis\b";

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PARAGRAPH_PATTERN).expect("paragraph pattern compiles"))
}

fn article_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ARTICLE_PATTERN).expect("article pattern compiles"))
}

fn section_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SECTION_TOKEN_PATTERN).expect("section token pattern compiles"))
}

// ============================================================================
// SECTION: Grammar
// ============================================================================

/// German statute and article citation grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanGrammar;

impl GermanGrammar {
    /// Creates the grammar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_paragraph(input: &str) -> Option<ParsedCitation> {
        let captures = paragraph_re().captures(input)?;
        let raw_sections = captures.name("sections")?.as_str();
        let (sections, numbers, compound) = normalize_sections(raw_sections)?;
        let marker = if compound { "§§" } else { "§" };
        let code = captures.name("code")?.as_str().to_uppercase();

        let mut parsed = BTreeMap::new();
        parsed.insert("marker".to_string(), marker.to_string());
        parsed.insert("section".to_string(), sections.clone());
        parsed.insert("code".to_string(), code.clone());
        let tail = normalize_tail(&captures, &mut parsed);

        let normalized = format!("{marker} {sections}{tail} {code}");
        let lookup_citations =
            numbers.iter().map(|number| format!("§ {number} {code}")).collect();
        Some(ParsedCitation {
            kind: CitationKind::Paragraph,
            normalized,
            parsed,
            lookup_citations,
        })
    }

    fn parse_article(input: &str) -> Option<ParsedCitation> {
        let captures = article_re().captures(input)?;
        let article = captures.name("article")?.as_str().to_lowercase();
        let code = captures.name("code")?.as_str().to_uppercase();

        let mut parsed = BTreeMap::new();
        parsed.insert("marker".to_string(), "Art.".to_string());
        parsed.insert("article".to_string(), article.clone());
        parsed.insert("code".to_string(), code.clone());
        let tail = normalize_tail(&captures, &mut parsed);

        let normalized = format!("Art. {article}{tail} {code}");
        let lookup_citations = vec![format!("Art. {article} {code}")];
        Some(ParsedCitation {
            kind: CitationKind::Article,
            normalized,
            parsed,
            lookup_citations,
        })
    }
}

impl CitationGrammar for GermanGrammar {
    fn parse(&self, input: &str) -> Option<ParsedCitation> {
        let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return None;
        }
        Self::parse_paragraph(&collapsed).or_else(|| Self::parse_article(&collapsed))
    }

    fn format(&self, citation: &ParsedCitation, style: CitationStyle) -> String {
        match style {
            CitationStyle::Default | CitationStyle::Pinpoint => citation.normalized.clone(),
            CitationStyle::Short => {
                let code = citation.component("code").unwrap_or_default();
                match citation.kind {
                    CitationKind::Paragraph => {
                        let marker = citation.component("marker").unwrap_or("§");
                        let section = citation.component("section").unwrap_or_default();
                        format!("{marker} {section} {code}")
                    }
                    CitationKind::Article => {
                        let article = citation.component("article").unwrap_or_default();
                        format!("Art. {article} {code}")
                    }
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Normalization Helpers
// ============================================================================

/// Normalizes a section spec.
///
/// Returns the canonical spec string, the section numbers in order, and
/// whether the spec is compound (list or range).
fn normalize_sections(raw: &str) -> Option<(String, Vec<String>, bool)> {
    let mut spec = String::new();
    let mut numbers = Vec::new();
    let mut compound = false;
    for token in section_token_re().find_iter(raw) {
        match token.as_str() {
            "," => {
                spec.push_str(", ");
                compound = true;
            }
            "-" => {
                spec.push('-');
                compound = true;
            }
            separator if separator.eq_ignore_ascii_case("bis") => {
                spec.push_str(" bis ");
                compound = true;
            }
            value => {
                let number = value.to_lowercase();
                spec.push_str(&number);
                numbers.push(number);
            }
        }
    }
    if numbers.is_empty() {
        return None;
    }
    Some((spec, numbers, compound))
}

/// Renders the canonical subdivision tail and records its components.
fn normalize_tail(captures: &regex::Captures<'_>, parsed: &mut BTreeMap<String, String>) -> String {
    let mut tail = String::new();
    for (group, key, label) in [
        ("paragraph", "paragraph", "Abs."),
        ("sentence", "sentence", "S."),
        ("number", "number", "Nr."),
        ("letter", "letter", "Buchst."),
    ] {
        if let Some(value) = captures.name(group) {
            let value = value.as_str().to_lowercase();
            tail.push_str(&format!(" {label} {value}"));
            parsed.insert(key.to_string(), value);
        }
    }
    tail
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
