//! Fachada del motor de análisis. Cada operación toma un identificador de
//! documento, resuelve el texto a través del almacén, tokeniza una sola
//! vez por llamada y ejecuta su pipeline heurístico. Las llamadas son
//! síncronas, sin estado compartido mutable: seguras en cualquier hilo.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::citations::{self, CitationPatterns};
use crate::compare;
use crate::concept_map;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::flashcards;
use crate::frequency::TermFrequencyIndex;
use crate::gaps;
use crate::glossary::{self, TermPatterns};
use crate::methodology;
use crate::models::{
    CitationResult, ComparisonResult, ConceptMapResult, DocumentComparison, FlashcardResult,
    GlossaryResult, MethodologyResult, ResearchGapsResult, SearchResultSet, SummaryResult,
};
use crate::search;
use crate::store::{Document, DocumentStore};
use crate::summarize;
use crate::text::TokenizedDocument;

/// Número de términos destacados usados como temas clave en comparaciones.
const KEY_THEMES: usize = 5;

/// Representación de trabajo de un documento dentro de una llamada:
/// texto tokenizado e índice de frecuencias, construidos una sola vez.
struct Session {
    doc: Arc<Document>,
    tokenized: TokenizedDocument,
    index: TermFrequencyIndex,
}

/// Motor de análisis de documentos. Sin bloqueo interno: sólo lee del
/// almacén y escribe en resultados recién asignados.
pub struct AnalysisEngine {
    store: Arc<dyn DocumentStore>,
    cfg: EngineConfig,
    citation_patterns: CitationPatterns,
    term_patterns: TermPatterns,
}

impl AnalysisEngine {
    pub fn new(store: Arc<dyn DocumentStore>, cfg: EngineConfig) -> Self {
        Self {
            store,
            cfg,
            citation_patterns: CitationPatterns::compile(),
            term_patterns: TermPatterns::compile(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    fn session(&self, doc_id: &str) -> Result<Session, EngineError> {
        let doc = self.store.fetch(doc_id)?;
        let tokenized = TokenizedDocument::build(&doc.text);
        let index = TermFrequencyIndex::build(&tokenized, &self.cfg.stopwords);
        debug!(
            "Sesión para '{}': {} frases, {} tokens.",
            doc_id,
            tokenized.sentences.len(),
            tokenized.tokens.len()
        );
        Ok(Session {
            doc,
            tokenized,
            index,
        })
    }

    /// Resúmenes corto y detallado. Falla con `EmptyDocument` si la
    /// tokenización no produce ninguna frase.
    pub fn summarize(&self, doc_id: &str) -> Result<SummaryResult, EngineError> {
        let s = self.session(doc_id)?;
        if s.tokenized.is_empty() {
            return Err(EngineError::EmptyDocument(doc_id.to_string()));
        }
        let scores = summarize::score_sentences(&s.tokenized, &s.index, &self.cfg.summary);
        let short_summary = summarize::select_summary(
            &s.tokenized,
            &scores,
            self.cfg.summary.short_char_budget,
            self.cfg.summary.short_max_sentences,
        );
        let detailed_summary = summarize::select_summary(
            &s.tokenized,
            &scores,
            self.cfg.summary.detailed_char_budget,
            self.cfg.summary.detailed_max_sentences,
        );
        info!("Resumen generado para '{doc_id}'.");
        Ok(SummaryResult {
            short_summary,
            detailed_summary,
            total_words: s.doc.word_count,
        })
    }

    /// Glosario técnico. Un documento vacío degrada a glosario vacío.
    pub fn glossary(&self, doc_id: &str) -> Result<GlossaryResult, EngineError> {
        let s = self.session(doc_id)?;
        Ok(glossary::build_glossary(
            &s.tokenized,
            &s.index,
            &self.term_patterns,
            &self.cfg.glossary,
            &|t| self.cfg.is_stopword(t),
        ))
    }

    /// Tarjetas de estudio. `requested == 0` es un parámetro inválido;
    /// por encima del tope configurado se acota en silencio.
    pub fn flashcards(
        &self,
        doc_id: &str,
        requested: usize,
    ) -> Result<FlashcardResult, EngineError> {
        if requested == 0 {
            return Err(EngineError::InvalidInput(
                "el número de tarjetas debe ser mayor que cero".to_string(),
            ));
        }
        let s = self.session(doc_id)?;
        let scores = summarize::score_sentences(&s.tokenized, &s.index, &self.cfg.summary);
        Ok(flashcards::generate_flashcards(
            &s.tokenized,
            &s.index,
            &scores,
            &self.cfg.flashcards,
            requested,
            &|t| self.cfg.is_stopword(t),
        ))
    }

    /// Citas y años de publicación.
    pub fn citations(&self, doc_id: &str) -> Result<CitationResult, EngineError> {
        let doc = self.store.fetch(doc_id)?;
        Ok(citations::extract_citations(
            &doc.text,
            &self.citation_patterns,
            self.cfg.max_references,
        ))
    }

    /// Clasificación metodológica. Cero coincidencias no es un error.
    pub fn methodology(&self, doc_id: &str) -> Result<MethodologyResult, EngineError> {
        let s = self.session(doc_id)?;
        Ok(methodology::classify_methodology(
            &s.tokenized,
            &self.cfg.methodology,
        ))
    }

    /// Huecos de investigación (limitaciones y trabajo futuro).
    pub fn research_gaps(&self, doc_id: &str) -> Result<ResearchGapsResult, EngineError> {
        let s = self.session(doc_id)?;
        Ok(gaps::find_research_gaps(
            &s.tokenized,
            &self.cfg.gap_indicators,
        ))
    }

    /// Grafo de conceptos con estadísticas agregadas.
    pub fn concept_map(&self, doc_id: &str) -> Result<ConceptMapResult, EngineError> {
        let s = self.session(doc_id)?;
        let graph = concept_map::build_concept_graph(&s.tokenized, &s.index, &self.cfg.concept);
        Ok(graph.to_result())
    }

    /// Búsqueda léxica dentro del documento. Una consulta sin términos
    /// compartidos devuelve una lista vacía.
    pub fn semantic_search(
        &self,
        doc_id: &str,
        query: &str,
    ) -> Result<SearchResultSet, EngineError> {
        let s = self.session(doc_id)?;
        Ok(search::search_document(&s.tokenized, query, &self.cfg.search))
    }

    /// Comparación de 2–3 documentos. Los registros preservan el orden de
    /// entrada; los insights agregados no dependen de él.
    pub fn compare(&self, doc_ids: &[String]) -> Result<ComparisonResult, EngineError> {
        if doc_ids.len() < 2 || doc_ids.len() > 3 {
            return Err(EngineError::InvalidInput(format!(
                "la comparación requiere entre 2 y 3 documentos, se recibieron {}",
                doc_ids.len()
            )));
        }

        let mut comparison_results: Vec<DocumentComparison> = Vec::with_capacity(doc_ids.len());
        let mut term_sets: Vec<HashSet<String>> = Vec::with_capacity(doc_ids.len());

        for doc_id in doc_ids {
            let s = self.session(doc_id)?;
            if s.tokenized.is_empty() {
                return Err(EngineError::InsufficientContent(doc_id.clone()));
            }

            let scores = summarize::score_sentences(&s.tokenized, &s.index, &self.cfg.summary);
            let research_focus = summarize::select_summary(
                &s.tokenized,
                &scores,
                self.cfg.summary.short_char_budget,
                self.cfg.summary.short_max_sentences,
            );

            let method = methodology::classify_methodology(&s.tokenized, &self.cfg.methodology);
            let methodology_approach = method
                .research_methods
                .first()
                .cloned()
                .unwrap_or_else(|| "No identificada".to_string());

            let top = s.index.top_terms(KEY_THEMES * 2);
            let key_themes: Vec<String> = top
                .iter()
                .take(KEY_THEMES)
                .map(|(t, _)| s.index.surface_form(t))
                .collect();
            term_sets.push(top.into_iter().map(|(t, _)| t).collect());

            let best = summarize::ranked_indices(&scores)
                .first()
                .map(|i| s.tokenized.sentences[*i].text.clone());
            let main_findings = compare::main_findings(&s.tokenized, best.as_deref());

            comparison_results.push(DocumentComparison {
                document_id: doc_id.clone(),
                research_focus,
                methodology_approach,
                key_themes,
                main_findings,
                word_count: s.doc.word_count,
            });
        }

        let content_insights = compare::content_insights(&comparison_results, &term_sets);
        info!("Comparación completada para {} documentos.", doc_ids.len());

        Ok(ComparisonResult {
            comparison_results,
            content_insights,
        })
    }
}
