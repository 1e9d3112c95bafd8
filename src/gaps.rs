//! Detección heurística de huecos de investigación: frases que mencionan
//! limitaciones o trabajo futuro, agrupadas en categorías amplias.

use crate::models::ResearchGapsResult;
use crate::summarize::truncate_chars;
use crate::text::TokenizedDocument;

/// Longitud mínima de una frase para considerarla una limitación real y no
/// un resto de segmentación.
const MIN_GAP_SENTENCE_LEN: usize = 30;
const MAX_GAP_SENTENCES: usize = 5;
const GAP_SENTENCE_CHARS: usize = 160;

/// Busca frases de limitación según los indicadores configurados y las
/// clasifica. Sin coincidencias devuelve listas vacías, nunca un error.
pub fn find_research_gaps(doc: &TokenizedDocument, indicators: &[String]) -> ResearchGapsResult {
    let mut gap_sentences: Vec<String> = Vec::new();

    for sentence in &doc.sentences {
        if sentence.text.len() < MIN_GAP_SENTENCE_LEN {
            continue;
        }
        let lower = sentence.text.to_lowercase();
        if indicators.iter().any(|ind| lower.contains(ind.as_str())) {
            gap_sentences.push(sentence.text.clone());
            if gap_sentences.len() >= MAX_GAP_SENTENCES {
                break;
            }
        }
    }

    let gap_categories = categorize(&gap_sentences);
    let research_gaps = gap_sentences
        .iter()
        .map(|s| truncate_chars(s, GAP_SENTENCE_CHARS))
        .collect();

    ResearchGapsResult {
        research_gaps,
        gap_categories,
    }
}

/// Cubos amplios según el vocabulario de las frases encontradas.
fn categorize(gap_sentences: &[String]) -> Vec<String> {
    if gap_sentences.is_empty() {
        return Vec::new();
    }
    let mut categories = Vec::new();
    let contains = |needle: &str| {
        gap_sentences
            .iter()
            .any(|s| s.to_lowercase().contains(needle))
    };
    if contains("method") {
        categories.push("Methodological".to_string());
    }
    if contains("theor") {
        categories.push("Theoretical".to_string());
    }
    if contains("data") {
        categories.push("Empirical".to_string());
    }
    if contains("technolog") {
        categories.push("Technological".to_string());
    }
    if categories.is_empty() {
        categories.push("General".to_string());
    }
    categories
}
