//! Modelos de resultado del motor. Cada operación devuelve una estructura
//! serializable nueva; ningún resultado se muta tras su creación.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Resúmenes corto y detallado de un documento.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub short_summary: String,
    pub detailed_summary: String,
    pub total_words: usize,
}

/// Entrada del glosario: término, definición contextual y frecuencia.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub definition: String,
    pub frequency: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlossaryResult {
    pub total_terms: usize,
    pub glossary: Vec<GlossaryTerm>,
}

/// Tipo de tarjeta de estudio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    ShortAnswer,
    MultipleChoice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
    #[serde(rename = "type")]
    pub kind: CardKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashcardResult {
    pub total_cards: usize,
    pub flashcards: Vec<Flashcard>,
}

/// Cita detectada: texto tal cual se encontró y token autor/año normalizado
/// (mejor esfuerzo, puede faltar).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Citation {
    pub raw: String,
    pub normalized: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationResult {
    pub total_citations: usize,
    /// Muestra acotada de citas, en orden de primera aparición.
    pub references: Vec<String>,
    /// Años de publicación vistos en el texto, por frecuencia descendente.
    pub publication_years: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCount {
    pub category: String,
    pub matches: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodologyResult {
    pub methodology_analysis: String,
    /// Nombres de categoría con al menos una coincidencia, de mayor a menor.
    pub research_methods: Vec<String>,
    pub method_counts: Vec<MethodCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchGapsResult {
    /// Frases de limitación encontradas, recortadas.
    pub research_gaps: Vec<String>,
    pub gap_categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptNodeInfo {
    pub name: String,
    pub frequency: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptEdgeInfo {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptMapResult {
    pub concepts: Vec<ConceptNodeInfo>,
    pub edges: Vec<ConceptEdgeInfo>,
    pub total_concepts: usize,
    pub total_edges: usize,
}

/// Chunk recuperado por la búsqueda léxica.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub text: String,
    /// Proporción de términos distintos de la consulta presentes en el chunk.
    pub score: f64,
    /// Índice del chunk en el orden del texto fuente (base 0).
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultSet {
    pub results: Vec<SearchHit>,
    pub total_chunks: usize,
}

/// Registro por documento dentro de una comparación.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentComparison {
    pub document_id: String,
    pub research_focus: String,
    pub methodology_approach: String,
    pub key_themes: Vec<String>,
    pub main_findings: Vec<String>,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Un registro por documento, en el orden de entrada.
    pub comparison_results: Vec<DocumentComparison>,
    pub content_insights: Vec<String>,
}

// --- Registros cacheables ---

/// Clase de artefacto, usada como parte de la clave de la caché.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Summary,
    Glossary,
    Flashcards,
    Citations,
    Methodology,
    ResearchGaps,
    ConceptMap,
    Search,
    Comparison,
}

/// Artefacto derivado, en su forma tipada.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Artifact {
    Summary(SummaryResult),
    Glossary(GlossaryResult),
    Flashcards(FlashcardResult),
    Citations(CitationResult),
    Methodology(MethodologyResult),
    ResearchGaps(ResearchGapsResult),
    ConceptMap(ConceptMapResult),
    Search(SearchResultSet),
    Comparison(ComparisonResult),
}

impl Artifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Summary(_) => ArtifactKind::Summary,
            Artifact::Glossary(_) => ArtifactKind::Glossary,
            Artifact::Flashcards(_) => ArtifactKind::Flashcards,
            Artifact::Citations(_) => ArtifactKind::Citations,
            Artifact::Methodology(_) => ArtifactKind::Methodology,
            Artifact::ResearchGaps(_) => ArtifactKind::ResearchGaps,
            Artifact::ConceptMap(_) => ArtifactKind::ConceptMap,
            Artifact::Search(_) => ArtifactKind::Search,
            Artifact::Comparison(_) => ArtifactKind::Comparison,
        }
    }
}

/// Registro cacheado: artefacto tipado más el instante de generación.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    pub generated_at: DateTime<Utc>,
    pub artifact: Artifact,
}

impl AnalysisRecord {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            generated_at: Utc::now(),
            artifact,
        }
    }
}
