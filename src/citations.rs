//! Extractor de citas por patrones: marcadores en el texto (numerales
//! entre corchetes, autor-año) y entradas de lista de referencias. Sin
//! resolución cruzada entre marcadores y entradas; la deduplicación es por
//! cadena exacta.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::models::{Citation, CitationResult};

/// Patrones bibliográficos, compilados una sola vez y compartidos por
/// todas las llamadas.
pub struct CitationPatterns {
    /// `[12]`
    bracketed: Regex,
    /// `(Smith, 2020)` o `(Smith et al., 2020; Doe, 2021)`
    author_year: Regex,
    /// `Smith et al., 2020` fuera de paréntesis
    et_al: Regex,
    /// Entrada de lista de referencias: numeral/corchete + autores + año
    reference_line: Regex,
    /// Años de publicación
    year: Regex,
    /// Token autor-año para la forma normalizada
    author_token: Regex,
}

impl CitationPatterns {
    pub fn compile() -> Self {
        Self {
            bracketed: Regex::new(r"\[\d{1,3}\]").expect("patrón de corchetes válido"),
            author_year: Regex::new(r"\([^()]*\b(?:19|20)\d{2}[^()]*\)")
                .expect("patrón autor-año válido"),
            et_al: Regex::new(r"\b[A-Z][a-z]+ et al\.?,? (?:19|20)\d{2}")
                .expect("patrón et al válido"),
            reference_line: Regex::new(r"^\s*(?:\[\d+\]|\d+\.)\s+\S.*\b(?:19|20)\d{2}")
                .expect("patrón de referencia válido"),
            year: Regex::new(r"\b(?:19|20)\d{2}\b").expect("patrón de año válido"),
            author_token: Regex::new(r"([A-Z][a-z]+)[^\d]*((?:19|20)\d{2})")
                .expect("patrón de autor válido"),
        }
    }

    /// Token `autor año` en minúsculas, mejor esfuerzo.
    fn normalize(&self, raw: &str) -> Option<String> {
        self.author_token.captures(raw).map(|c| {
            format!("{} {}", c[1].to_lowercase(), &c[2])
        })
    }
}

/// Extrae citas del texto completo. `max_references` acota la muestra
/// devuelta, no el recuento total.
pub fn extract_citations(
    text: &str,
    patterns: &CitationPatterns,
    max_references: usize,
) -> CitationResult {
    let mut seen: HashSet<String> = HashSet::new();
    let mut citations: Vec<Citation> = Vec::new();

    let mut push = |raw: &str| {
        let raw = raw.trim();
        if raw.is_empty() || !seen.insert(raw.to_string()) {
            return;
        }
        citations.push(Citation {
            raw: raw.to_string(),
            normalized: patterns.normalize(raw),
        });
    };

    // (a) Marcadores en el cuerpo del texto.
    for m in patterns.bracketed.find_iter(text) {
        push(m.as_str());
    }
    for m in patterns.author_year.find_iter(text) {
        push(m.as_str());
    }
    for m in patterns.et_al.find_iter(text) {
        push(m.as_str());
    }

    // (b) Entradas de la lista de referencias, línea a línea.
    for line in text.lines() {
        if patterns.reference_line.is_match(line) {
            push(line);
        }
    }

    let total_citations = citations.len();
    let references: Vec<String> = citations
        .iter()
        .take(max_references)
        .map(|c| c.raw.clone())
        .collect();

    CitationResult {
        total_citations,
        references,
        publication_years: publication_years(text, &patterns.year),
    }
}

/// Años distintos vistos en el texto, por frecuencia descendente y
/// desempate por año ascendente, acotados a diez.
fn publication_years(text: &str, year: &Regex) -> Vec<String> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for m in year.find_iter(text) {
        *counts.entry(m.as_str().to_string()).or_insert(0) += 1;
    }
    let mut years: Vec<(String, u32)> = counts.into_iter().collect();
    years.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    years.truncate(10);
    years.into_iter().map(|(y, _)| y).collect()
}
