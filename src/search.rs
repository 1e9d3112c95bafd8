//! Búsqueda dentro del documento por solapamiento léxico: el texto se
//! trocea en chunks alineados a frases y cada chunk se puntúa por la
//! proporción de términos distintos de la consulta que contiene. Sin
//! embeddings: es búsqueda textual, no vectorial.

use std::collections::HashSet;

use crate::config::SearchConfig;
use crate::models::{SearchHit, SearchResultSet};
use crate::text::{tokenize, TokenizedDocument};

/// Chunk con sus tokens precalculados.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub text: String,
    pub tokens: HashSet<String>,
}

/// Agrupa frases consecutivas en chunks de como máximo `max_chars`
/// caracteres. Una frase que exceda por sí sola el límite forma su propio
/// chunk: nunca se descarta contenido.
pub fn chunk_document(doc: &TokenizedDocument, max_chars: usize) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut current_text = String::new();
    let mut current_tokens: HashSet<String> = HashSet::new();

    for sentence in &doc.sentences {
        if !current_text.is_empty() && current_text.len() + sentence.text.len() + 1 > max_chars {
            chunks.push(Chunk {
                text: std::mem::take(&mut current_text),
                tokens: std::mem::take(&mut current_tokens),
            });
        }
        if !current_text.is_empty() {
            current_text.push(' ');
        }
        current_text.push_str(&sentence.text);
        current_tokens.extend(sentence.token_set.iter().cloned());
    }
    if !current_text.is_empty() {
        chunks.push(Chunk {
            text: current_text,
            tokens: current_tokens,
        });
    }
    chunks
}

/// Ejecuta la consulta sobre el documento troceado. Una consulta sin
/// términos compartidos devuelve una lista vacía, nunca un error.
pub fn search_document(
    doc: &TokenizedDocument,
    query: &str,
    cfg: &SearchConfig,
) -> SearchResultSet {
    let chunks = chunk_document(doc, cfg.chunk_chars);
    let total_chunks = chunks.len();

    let query_terms: HashSet<String> = tokenize(query).into_iter().collect();
    if query_terms.is_empty() {
        return SearchResultSet {
            results: Vec::new(),
            total_chunks,
        };
    }

    let mut results: Vec<SearchHit> = chunks
        .iter()
        .enumerate()
        .filter_map(|(position, chunk)| {
            let shared = query_terms
                .iter()
                .filter(|t| chunk.tokens.contains(*t))
                .count();
            (shared > 0).then(|| SearchHit {
                text: chunk.text.clone(),
                score: shared as f64 / query_terms.len() as f64,
                position,
            })
        })
        .collect();

    // Orden descendente por puntuación, desempate por posición original.
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.position.cmp(&b.position))
    });
    results.truncate(cfg.max_results);

    SearchResultSet {
        results,
        total_chunks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::text::TokenizedDocument;

    const TEXT: &str = "Attention mechanisms allow models to focus on relevant parts. \
        This paper proposes a new Transformer architecture. \
        Experiments show improved BLEU scores on translation benchmarks. \
        Training used eight GPUs for twelve hours.";

    fn search(query: &str) -> SearchResultSet {
        let doc = TokenizedDocument::build(TEXT);
        search_document(&doc, query, &SearchConfig::default())
    }

    #[test]
    fn consulta_sin_solapamiento_devuelve_vacio() {
        let result = search("quantum chromodynamics lattice");
        assert!(result.results.is_empty());
        assert!(result.total_chunks > 0);
    }

    #[test]
    fn puntuacion_en_rango_unitario() {
        let result = search("transformer architecture");
        assert!(!result.results.is_empty());
        for hit in &result.results {
            assert!(hit.score > 0.0 && hit.score <= 1.0);
        }
    }

    #[test]
    fn orden_descendente_con_desempate_por_posicion() {
        let result = search("attention transformer experiments");
        for pair in result.results.windows(2) {
            assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].position < pair[1].position)
            );
        }
    }

    #[test]
    fn frase_gigante_forma_su_propio_chunk() {
        let long = "word ".repeat(500);
        let doc = TokenizedDocument::build(&long);
        let chunks = chunk_document(&doc, 100);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.len() > 100);
    }

    #[test]
    fn posiciones_siguen_el_orden_del_texto() {
        let doc = TokenizedDocument::build(TEXT);
        let cfg = SearchConfig {
            chunk_chars: 60,
            max_results: 10,
        };
        let result = search_document(&doc, "attention gpus", &cfg);
        assert!(result.results.iter().all(|h| h.position < result.total_chunks));
    }
}
