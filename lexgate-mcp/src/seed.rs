// lexgate-mcp/src/seed.rs
// ============================================================================
// Module: Seed Corpus
// Description: Embedded fallback documents for the German adapter.
// Purpose: Keep statute lookups answering when the corpus file is absent.
// Dependencies: lexgate-core, lexgate-grammar
// ============================================================================

//! ## Overview
//! A small embedded statute set used only when the store reports
//! unavailable. Seed search mirrors the store's tier order in miniature:
//! exact citation match first, then AND-ed substring matching over title,
//! citation, and snippet.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use lexgate_core::Document;
use lexgate_core::DocumentKind;
use lexgate_core::Metadata;
use lexgate_grammar::CitationGrammar;
use serde_json::Value;

// ============================================================================
// SECTION: Seed Data
// ============================================================================

/// Builds the embedded German statute seed set.
#[must_use]
pub fn german_seed_documents() -> Vec<Document> {
    vec![
        seed(
            "gg:art-1",
            DocumentKind::Statute,
            "GG Art. 1 Schutz der Menschenwürde",
            "Art. 1 GG",
            "https://www.gesetze-im-internet.de/gg/art_1.html",
            "1949-05-24",
            "Die Würde des Menschen ist unantastbar. Sie zu achten und zu schützen ist \
             Verpflichtung aller staatlichen Gewalt.",
            "gg",
        ),
        seed(
            "gg:art-2",
            DocumentKind::Statute,
            "GG Art. 2 Freie Entfaltung der Persönlichkeit",
            "Art. 2 GG",
            "https://www.gesetze-im-internet.de/gg/art_2.html",
            "1949-05-24",
            "Jeder hat das Recht auf die freie Entfaltung seiner Persönlichkeit.",
            "gg",
        ),
        seed(
            "bgb:823",
            DocumentKind::Statute,
            "BGB § 823 Schadensersatzpflicht",
            "§ 823 BGB",
            "https://www.gesetze-im-internet.de/bgb/__823.html",
            "2002-01-02",
            "Wer vorsätzlich oder fahrlässig das Leben, den Körper, die Gesundheit, die \
             Freiheit, das Eigentum oder ein sonstiges Recht eines anderen widerrechtlich \
             verletzt, ist dem anderen zum Ersatz des daraus entstehenden Schadens \
             verpflichtet.",
            "bgb",
        ),
        seed(
            "bdsg:1",
            DocumentKind::Statute,
            "BDSG § 1 Anwendungsbereich des Gesetzes",
            "§ 1 BDSG",
            "https://www.gesetze-im-internet.de/bdsg_2018/__1.html",
            "2018-05-25",
            "Dieses Gesetz dient der Durchführung der Verordnung (EU) 2016/679 und der \
             Umsetzung der Richtlinie (EU) 2016/680.",
            "bdsg",
        ),
        seed(
            "bdsg:2",
            DocumentKind::Statute,
            "BDSG § 2 Begriffsbestimmungen",
            "§ 2 BDSG",
            "https://www.gesetze-im-internet.de/bdsg_2018/__2.html",
            "2018-05-25",
            "Begriffsbestimmungen für öffentliche und nichtöffentliche Stellen.",
            "bdsg",
        ),
    ]
}

fn seed(
    id: &str,
    kind: DocumentKind,
    title: &str,
    citation: &str,
    source_url: &str,
    effective_date: &str,
    snippet: &str,
    statute_id: &str,
) -> Document {
    let mut metadata = Metadata::new();
    metadata.insert("statute_id".to_string(), Value::String(statute_id.to_string()));
    metadata.insert("seed".to_string(), Value::Bool(true));
    Document {
        id: id.to_string(),
        jurisdiction: "de".to_string(),
        kind,
        title: title.to_string(),
        citation: Some(citation.to_string()),
        source_url: Some(source_url.to_string()),
        effective_date: Some(effective_date.to_string()),
        text_snippet: Some(snippet.to_string()),
        metadata,
    }
}

// ============================================================================
// SECTION: Seed Search
// ============================================================================

/// Searches the seed set with the store's tier order in miniature.
#[must_use]
pub fn search_seed_documents(
    seeds: &[Document],
    query: &str,
    limit: usize,
    grammar: &dyn CitationGrammar,
) -> Vec<Document> {
    let limit = limit.clamp(1, 100);
    let mut results: Vec<Document> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    if let Some(parsed) = grammar.parse(query) {
        for lookup in &parsed.lookup_citations {
            let lookup = lookup.to_lowercase();
            for document in seeds {
                if results.len() >= limit {
                    break;
                }
                let matched = document
                    .citation
                    .as_deref()
                    .is_some_and(|citation| citation.to_lowercase() == lookup);
                if matched && seen.insert(document.id.clone()) {
                    results.push(document.clone());
                }
            }
        }
    }

    let tokens: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect();
    if !tokens.is_empty() {
        for document in seeds {
            if results.len() >= limit {
                break;
            }
            let haystack = document.searchable_text().to_lowercase();
            if tokens.iter().all(|token| haystack.contains(token))
                && seen.insert(document.id.clone())
            {
                results.push(document.clone());
            }
        }
    }

    results
}

/// Finds a seed document by id.
#[must_use]
pub fn find_seed_document(seeds: &[Document], id: &str) -> Option<Document> {
    seeds.iter().find(|document| document.id == id).cloned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
