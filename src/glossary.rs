//! Glosario técnico: candidatos por patrones (siglas, sintagmas
//! capitalizados) y por frecuencia, con definición contextual tomada de la
//! primera frase que contiene el término. La vía sin frase contenedora usa
//! una plantilla y nunca falla.

use std::collections::HashMap;

use regex::Regex;

use crate::config::GlossaryConfig;
use crate::frequency::TermFrequencyIndex;
use crate::models::{GlossaryResult, GlossaryTerm};
use crate::summarize::truncate_chars;
use crate::text::TokenizedDocument;

/// Patrones de términos candidatos, compilados una sola vez.
pub struct TermPatterns {
    acronyms: Regex,
    capitalized_phrases: Regex,
}

impl TermPatterns {
    pub fn compile() -> Self {
        Self {
            acronyms: Regex::new(r"\b[A-Z]{2,}\b").expect("patrón de siglas válido"),
            capitalized_phrases: Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b")
                .expect("patrón de sintagmas válido"),
        }
    }
}

/// Construye el glosario del documento. Los términos son únicos sin
/// distinguir mayúsculas; el orden es frecuencia descendente con desempate
/// alfabético.
pub fn build_glossary(
    doc: &TokenizedDocument,
    index: &TermFrequencyIndex,
    patterns: &TermPatterns,
    cfg: &GlossaryConfig,
    is_stopword: &dyn Fn(&str) -> bool,
) -> GlossaryResult {
    // minúscula -> (forma visible, frecuencia)
    let mut candidates: HashMap<String, (String, u32)> = HashMap::new();

    let mut add = |surface: &str, freq: u32| {
        let lower = surface.to_lowercase();
        if lower.len() < 3 || lower.len() > 40 || is_stopword(&lower) {
            return;
        }
        let entry = candidates
            .entry(lower)
            .or_insert_with(|| (surface.to_string(), 0));
        entry.1 = entry.1.max(freq);
    };

    for sentence in &doc.sentences {
        for m in patterns.acronyms.find_iter(&sentence.text) {
            let term = m.as_str();
            let freq = index.frequency(term).max(1);
            add(term, freq);
        }
        for m in patterns.capitalized_phrases.find_iter(&sentence.text) {
            let term = m.as_str();
            let freq = index.frequency(term).max(1);
            add(term, freq);
        }
    }

    // Unigramas y bigramas repetidos con suficiente frecuencia.
    for (term, freq) in index.top_terms(cfg.max_terms * 2) {
        if freq >= cfg.min_term_frequency {
            add(&index.surface_form(&term), freq);
        }
    }
    for (term, freq) in index.top_bigrams(cfg.max_terms) {
        if freq >= cfg.min_term_frequency {
            add(&index.surface_form(&term), freq);
        }
    }

    let mut ranked: Vec<(String, String, u32)> = candidates
        .into_iter()
        .map(|(lower, (surface, freq))| (lower, surface, freq))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(cfg.max_terms);

    let glossary: Vec<GlossaryTerm> = ranked
        .into_iter()
        .map(|(lower, surface, frequency)| GlossaryTerm {
            definition: define_term(doc, &lower, &surface, frequency, cfg),
            term: surface,
            frequency,
        })
        .collect();

    GlossaryResult {
        total_terms: glossary.len(),
        glossary,
    }
}

/// Primera frase del documento que contiene el término, recortada; si no
/// existe, explicación de plantilla.
fn define_term(
    doc: &TokenizedDocument,
    lower: &str,
    surface: &str,
    frequency: u32,
    cfg: &GlossaryConfig,
) -> String {
    for sentence in &doc.sentences {
        if sentence.text.to_lowercase().contains(lower) {
            return truncate_chars(&sentence.text, cfg.definition_max_chars);
        }
    }
    format!(
        "Término técnico '{}' empleado en el documento ({} {}).",
        surface,
        frequency,
        if frequency == 1 { "aparición" } else { "apariciones" }
    )
}
