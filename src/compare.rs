//! Agregación entre documentos: hallazgos principales por documento e
//! insights narrativos del conjunto comparado. Los registros por documento
//! preservan el orden de entrada; los insights agregados no dependen de él.

use std::collections::HashSet;

use crate::models::DocumentComparison;
use crate::text::TokenizedDocument;

/// Señales léxicas de hallazgo en artículos en inglés.
const FINDING_CUES: &[&str] = &[
    "results show", "we show", "we find", "we found", "demonstrate",
    "demonstrates", "improved", "improves", "outperforms", "achieves",
    "findings",
];

const MAX_FINDINGS: usize = 3;

/// Frases de hallazgo del documento, en orden de aparición. Si ninguna
/// frase contiene una señal, cae a la frase mejor puntuada dada.
pub fn main_findings(doc: &TokenizedDocument, fallback_sentence: Option<&str>) -> Vec<String> {
    let mut findings: Vec<String> = Vec::new();
    for sentence in &doc.sentences {
        let lower = sentence.text.to_lowercase();
        if FINDING_CUES.iter().any(|cue| lower.contains(cue)) {
            findings.push(sentence.text.clone());
            if findings.len() >= MAX_FINDINGS {
                break;
            }
        }
    }
    if findings.is_empty() {
        if let Some(fallback) = fallback_sentence {
            findings.push(fallback.to_string());
        }
    }
    findings
}

/// Insights narrativos sobre el conjunto: tamaño, extremos y términos
/// destacados compartidos. Insensible al orden de los documentos.
pub fn content_insights(
    records: &[DocumentComparison],
    term_sets: &[HashSet<String>],
) -> Vec<String> {
    let mut insights = Vec::new();

    insights.push(format!("Se han comparado {} documentos.", records.len()));

    if let Some(longest) = records.iter().max_by_key(|r| r.word_count) {
        insights.push(format!(
            "El documento más extenso es '{}' con {} palabras.",
            longest.document_id, longest.word_count
        ));
    }

    let avg: usize =
        records.iter().map(|r| r.word_count).sum::<usize>() / records.len().max(1);
    insights.push(format!(
        "Longitud media del conjunto: {} palabras por documento.",
        avg
    ));

    let shared = shared_terms(term_sets);
    if shared.is_empty() {
        insights.push("Los documentos no comparten términos destacados.".to_string());
    } else {
        insights.push(format!(
            "Términos destacados compartidos por todos los documentos: {}.",
            shared.join(", ")
        ));
    }

    insights
}

/// Intersección de los términos destacados de todos los documentos, en
/// orden alfabético para mantener la salida determinista.
fn shared_terms(term_sets: &[HashSet<String>]) -> Vec<String> {
    let Some(first) = term_sets.first() else {
        return Vec::new();
    };
    let mut shared: Vec<String> = first
        .iter()
        .filter(|t| term_sets[1..].iter().all(|s| s.contains(*t)))
        .cloned()
        .collect();
    shared.sort();
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TokenizedDocument;

    fn record(id: &str, words: usize) -> DocumentComparison {
        DocumentComparison {
            document_id: id.to_string(),
            research_focus: String::new(),
            methodology_approach: String::new(),
            key_themes: Vec::new(),
            main_findings: Vec::new(),
            word_count: words,
        }
    }

    fn set(terms: &[&str]) -> HashSet<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn hallazgos_por_senales_lexicas() {
        let doc = TokenizedDocument::build(
            "The setup is standard. Results show a clear gain. The method outperforms baselines.",
        );
        let findings = main_findings(&doc, None);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].starts_with("Results show"));
    }

    #[test]
    fn sin_senales_usa_la_frase_de_respaldo() {
        let doc = TokenizedDocument::build("Nothing conclusive here at all.");
        let findings = main_findings(&doc, Some("Nothing conclusive here at all."));
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn insight_del_documento_mas_extenso() {
        let records = vec![record("a.pdf", 100), record("b.pdf", 900)];
        let sets = vec![set(&["x"]), set(&["y"])];
        let insights = content_insights(&records, &sets);
        assert!(insights.iter().any(|i| i.contains("b.pdf")));
    }

    #[test]
    fn terminos_compartidos_en_orden_alfabetico() {
        let sets = vec![
            set(&["beta", "alpha", "gamma"]),
            set(&["alpha", "beta", "delta"]),
        ];
        let shared = shared_terms(&sets);
        assert_eq!(shared, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn insights_insensibles_al_orden() {
        let a = vec![record("a.pdf", 100), record("b.pdf", 900)];
        let b = vec![record("b.pdf", 900), record("a.pdf", 100)];
        let sets_a = vec![set(&["x", "z"]), set(&["z"])];
        let sets_b = vec![set(&["z"]), set(&["x", "z"])];
        let mut ia = content_insights(&a, &sets_a);
        let mut ib = content_insights(&b, &sets_b);
        ia.sort();
        ib.sort();
        assert_eq!(ia, ib);
    }
}
