//! Resumidor extractivo: puntúa frases por posición, solapamiento con los
//! términos frecuentes del documento y penalización por longitud, y las
//! selecciona dentro de un presupuesto de caracteres conservando el orden
//! original del texto.

use std::collections::HashSet;

use crate::config::SummaryConfig;
use crate::frequency::TermFrequencyIndex;
use crate::text::TokenizedDocument;

/// Puntuación de una frase por su índice en el documento.
#[derive(Debug, Clone, Copy)]
pub struct SentenceScore {
    pub index: usize,
    pub score: f64,
}

/// Puntúa todas las frases del documento. Determinista.
pub fn score_sentences(
    doc: &TokenizedDocument,
    index: &TermFrequencyIndex,
    cfg: &SummaryConfig,
) -> Vec<SentenceScore> {
    let total = doc.sentences.len();
    let top_terms: HashSet<String> = index
        .top_terms(cfg.top_terms)
        .into_iter()
        .map(|(t, _)| t)
        .collect();
    let top_len = top_terms.len().max(1);

    doc.sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            // Las frases tempranas puntúan más alto: resúmenes e
            // introducciones concentran la información.
            let position = (total - i) as f64 / total as f64;

            let overlap = sentence
                .token_set
                .iter()
                .filter(|t| top_terms.contains(*t))
                .count() as f64
                / top_len as f64;

            let words = sentence.tokens.len();
            let length_factor = if words < 8 {
                0.4
            } else if words > 40 {
                0.7
            } else {
                1.0
            };

            SentenceScore {
                index: i,
                score: (position + 2.0 * overlap) * length_factor,
            }
        })
        .collect()
}

/// Índices de frase ordenados de mayor a menor puntuación, con desempate
/// por posición en el documento.
pub fn ranked_indices(scores: &[SentenceScore]) -> Vec<usize> {
    let mut ranked: Vec<&SentenceScore> = scores.iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
    ranked.iter().map(|s| s.index).collect()
}

/// Selecciona frases en orden de puntuación hasta agotar el presupuesto de
/// caracteres o el techo de frases, y las emite en el orden del documento.
/// Si ninguna frase cabe en el presupuesto, se emite la mejor truncada.
pub fn select_summary(
    doc: &TokenizedDocument,
    scores: &[SentenceScore],
    char_budget: usize,
    max_sentences: usize,
) -> String {
    let ranked = ranked_indices(scores);

    let mut chosen: Vec<usize> = Vec::new();
    let mut used = 0usize;
    for idx in &ranked {
        if chosen.len() >= max_sentences {
            break;
        }
        let len = doc.sentences[*idx].text.len();
        if used + len > char_budget {
            continue;
        }
        used += len + 1;
        chosen.push(*idx);
    }

    if chosen.is_empty() {
        // Ninguna frase entera cabe: degradar a la mejor frase truncada.
        return match ranked.first() {
            Some(best) => truncate_chars(&doc.sentences[*best].text, char_budget),
            None => String::new(),
        };
    }

    chosen.sort_unstable();
    chosen
        .iter()
        .map(|i| doc.sentences[*i].text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Recorta por caracteres respetando fronteras UTF-8.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.len() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummaryConfig;
    use crate::frequency::TermFrequencyIndex;
    use std::collections::HashSet;

    const TEXT: &str = "Attention mechanisms allow neural models to focus on relevant input parts. \
        This paper proposes a novel transformer architecture for machine translation tasks. \
        The training corpus contains several million aligned sentence pairs for evaluation. \
        Experiments show improved translation quality over strong recurrent baselines. \
        We release the code publicly.";

    fn setup() -> (TokenizedDocument, TermFrequencyIndex) {
        let doc = TokenizedDocument::build(TEXT);
        let stop: HashSet<String> = ["the", "this", "for", "to", "on", "over", "we"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let idx = TermFrequencyIndex::build(&doc, &stop);
        (doc, idx)
    }

    #[test]
    fn resumen_conserva_orden_del_documento() {
        let (doc, idx) = setup();
        let cfg = SummaryConfig::default();
        let scores = score_sentences(&doc, &idx, &cfg);
        let summary = select_summary(&doc, &scores, 1500, 8);
        // Cada frase seleccionada aparece después de la anterior.
        let mut last = 0;
        for sentence in doc.sentences.iter().map(|s| &s.text) {
            if let Some(pos) = summary.find(sentence.as_str()) {
                assert!(pos >= last);
                last = pos;
            }
        }
    }

    #[test]
    fn corto_no_excede_al_detallado() {
        let (doc, idx) = setup();
        let cfg = SummaryConfig::default();
        let scores = score_sentences(&doc, &idx, &cfg);
        let short = select_summary(&doc, &scores, cfg.short_char_budget, cfg.short_max_sentences);
        let detailed = select_summary(
            &doc,
            &scores,
            cfg.detailed_char_budget,
            cfg.detailed_max_sentences,
        );
        assert!(short.len() <= detailed.len());
    }

    #[test]
    fn presupuesto_minusculo_trunca_la_mejor_frase() {
        let (doc, idx) = setup();
        let cfg = SummaryConfig::default();
        let scores = score_sentences(&doc, &idx, &cfg);
        let summary = select_summary(&doc, &scores, 30, 3);
        assert!(!summary.is_empty());
        assert!(summary.len() <= 30);
    }

    #[test]
    fn puntuacion_determinista() {
        let (doc, idx) = setup();
        let cfg = SummaryConfig::default();
        let a: Vec<f64> = score_sentences(&doc, &idx, &cfg).iter().map(|s| s.score).collect();
        let b: Vec<f64> = score_sentences(&doc, &idx, &cfg).iter().map(|s| s.score).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn truncado_respeta_utf8() {
        let t = truncate_chars("árbol de decisión con acentos", 10);
        assert!(t.ends_with("..."));
        assert!(t.chars().count() <= 10);
    }
}
