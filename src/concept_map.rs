//! Grafo de conceptos: nodos planos indexados (los términos más
//! frecuentes) y aristas como pares de índices ponderados por
//! co-ocurrencia dentro de la misma frase. Sin auto-aristas y sin
//! referencias mutuas entre nodos.

use std::collections::HashMap;

use crate::config::ConceptConfig;
use crate::frequency::TermFrequencyIndex;
use crate::models::{ConceptEdgeInfo, ConceptMapResult, ConceptNodeInfo};
use crate::text::TokenizedDocument;

/// Nodo del grafo en su forma interna.
#[derive(Debug, Clone)]
pub struct ConceptNode {
    pub label: String,
    /// Token en minúsculas con el que se busca en cada frase.
    pub token: String,
    pub frequency: u32,
}

/// Arista como par de índices de nodo (i < j) y peso de co-ocurrencia.
pub type ConceptEdge = (usize, usize, u32);

#[derive(Debug, Clone)]
pub struct ConceptGraph {
    pub nodes: Vec<ConceptNode>,
    pub edges: Vec<ConceptEdge>,
}

/// Construye el grafo: nodos desde los `max_nodes` términos más
/// frecuentes, aristas entre nodos que co-ocurren en alguna frase.
pub fn build_concept_graph(
    doc: &TokenizedDocument,
    index: &TermFrequencyIndex,
    cfg: &ConceptConfig,
) -> ConceptGraph {
    let nodes: Vec<ConceptNode> = index
        .top_terms(cfg.max_nodes)
        .into_iter()
        .map(|(token, frequency)| ConceptNode {
            label: index.surface_form(&token),
            token,
            frequency,
        })
        .collect();

    // Co-ocurrencia por frase; el par (i, j) siempre con i < j, de modo
    // que una auto-arista es imposible por construcción.
    let mut weights: HashMap<(usize, usize), u32> = HashMap::new();
    for sentence in &doc.sentences {
        let present: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| sentence.token_set.contains(&n.token))
            .map(|(i, _)| i)
            .collect();
        for (a, i) in present.iter().enumerate() {
            for j in present.iter().skip(a + 1) {
                *weights.entry((*i, *j)).or_insert(0) += 1;
            }
        }
    }

    let mut edges: Vec<ConceptEdge> = weights
        .into_iter()
        .map(|((i, j), w)| (i, j, w))
        .collect();
    edges.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| (a.0, a.1).cmp(&(b.0, b.1))));

    ConceptGraph { nodes, edges }
}

impl ConceptGraph {
    /// Proyección serializable con etiquetas en lugar de índices.
    pub fn to_result(&self) -> ConceptMapResult {
        let concepts: Vec<ConceptNodeInfo> = self
            .nodes
            .iter()
            .map(|n| ConceptNodeInfo {
                name: n.label.clone(),
                frequency: n.frequency,
            })
            .collect();
        let edges: Vec<ConceptEdgeInfo> = self
            .edges
            .iter()
            .map(|(i, j, w)| ConceptEdgeInfo {
                source: self.nodes[*i].label.clone(),
                target: self.nodes[*j].label.clone(),
                weight: *w,
            })
            .collect();
        ConceptMapResult {
            total_concepts: concepts.len(),
            total_edges: edges.len(),
            concepts,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConceptConfig, EngineConfig};
    use crate::frequency::TermFrequencyIndex;
    use crate::text::TokenizedDocument;

    fn graph(text: &str) -> ConceptGraph {
        let cfg = EngineConfig::default();
        let doc = TokenizedDocument::build(text);
        let idx = TermFrequencyIndex::build(&doc, &cfg.stopwords);
        build_concept_graph(&doc, &idx, &ConceptConfig::default())
    }

    const SCENARIO: &str = "Attention mechanisms allow models to focus on relevant parts of input. \
        This paper proposes a new Transformer architecture. \
        Experiments show improved BLEU scores.";

    #[test]
    fn incluye_terminos_clave_capitalizados() {
        let g = graph(SCENARIO);
        let labels: Vec<&str> = g.nodes.iter().map(|n| n.label.as_str()).collect();
        assert!(labels.contains(&"Transformer"));
        assert!(labels.contains(&"Attention"));
    }

    #[test]
    fn arista_entre_coocurrentes_en_la_misma_frase() {
        let g = graph(SCENARIO);
        let idx_of = |label: &str| {
            g.nodes
                .iter()
                .position(|n| n.label == label)
                .expect("nodo presente")
        };
        let t = idx_of("Transformer");
        let a = idx_of("architecture");
        let (lo, hi) = if t < a { (t, a) } else { (a, t) };
        assert!(g.edges.iter().any(|(i, j, _)| (*i, *j) == (lo, hi)));
    }

    #[test]
    fn sin_auto_aristas() {
        let g = graph(SCENARIO);
        assert!(g.edges.iter().all(|(i, j, _)| i != j));
    }

    #[test]
    fn sin_arista_entre_frases_distintas() {
        let g = graph("Alpha beta gamma delta epsilon. Zeta eta theta iota kappa.");
        let idx_of = |label: &str| g.nodes.iter().position(|n| n.label.eq_ignore_ascii_case(label));
        if let (Some(a), Some(z)) = (idx_of("alpha"), idx_of("zeta")) {
            let (lo, hi) = if a < z { (a, z) } else { (z, a) };
            assert!(!g.edges.iter().any(|(i, j, _)| (*i, *j) == (lo, hi)));
        }
    }

    #[test]
    fn estadisticas_coherentes() {
        let g = graph(SCENARIO);
        let result = g.to_result();
        assert_eq!(result.total_concepts, result.concepts.len());
        assert_eq!(result.total_edges, result.edges.len());
        assert!(result.total_concepts <= ConceptConfig::default().max_nodes);
    }
}
