//! Configuración inmutable del motor: presupuestos, topes y tablas de
//! vocabulario. Las tablas se pasan a cada componente como valores, nunca
//! como estado global, para poder probarlas con vocabularios a medida.

use std::collections::HashSet;
use std::env;

/// Palabras funcionales del inglés excluidas del índice de frecuencias.
/// Los artículos analizados están en inglés aunque la interfaz no lo esté.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "and", "or", "but",
    "nor", "not", "of", "in", "on", "at", "to", "for", "from", "with", "by",
    "as", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "do", "does", "did", "will", "would", "can", "could", "should",
    "may", "might", "must", "shall", "it", "its", "we", "our", "they",
    "their", "them", "he", "she", "his", "her", "you", "your", "i", "my",
    "which", "what", "when", "where", "while", "who", "whom", "whose",
    "there", "here", "then", "than", "also", "such", "into", "onto", "over",
    "under", "about", "after", "before", "between", "both", "each", "few",
    "more", "most", "other", "some", "any", "all", "only", "own", "same",
    "so", "too", "very", "per", "via", "new", "one", "two", "if", "because",
    "however", "thus", "therefore", "hence", "upon", "during", "within",
    "without", "et", "al",
];

/// Categoría metodológica con sus palabras disparadoras (coincidencia por
/// token, insensible a mayúsculas).
#[derive(Debug, Clone)]
pub struct MethodCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

impl MethodCategory {
    fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Presupuestos del resumidor (caracteres y techo de frases).
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub short_char_budget: usize,
    pub detailed_char_budget: usize,
    pub short_max_sentences: usize,
    pub detailed_max_sentences: usize,
    /// Número de términos frecuentes contra los que se puntúa cada frase.
    pub top_terms: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            short_char_budget: 500,
            detailed_char_budget: 1500,
            short_max_sentences: 3,
            detailed_max_sentences: 8,
            top_terms: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GlossaryConfig {
    pub max_terms: usize,
    pub definition_max_chars: usize,
    /// Frecuencia mínima para promocionar unigramas/bigramas genéricos.
    pub min_term_frequency: u32,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            max_terms: 20,
            definition_max_chars: 220,
            min_term_frequency: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlashcardConfig {
    pub default_cards: usize,
    pub max_cards: usize,
}

impl Default for FlashcardConfig {
    fn default() -> Self {
        Self {
            default_cards: 8,
            max_cards: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConceptConfig {
    /// Tope de nodos del grafo de conceptos.
    pub max_nodes: usize,
}

impl Default for ConceptConfig {
    fn default() -> Self {
        Self { max_nodes: 20 }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Tamaño máximo (caracteres) de cada chunk alineado a frases.
    pub chunk_chars: usize,
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            chunk_chars: 600,
            max_results: 10,
        }
    }
}

/// Configuración completa del motor de análisis.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub summary: SummaryConfig,
    pub glossary: GlossaryConfig,
    pub flashcards: FlashcardConfig,
    pub concept: ConceptConfig,
    pub search: SearchConfig,
    pub methodology: Vec<MethodCategory>,
    pub gap_indicators: Vec<String>,
    pub stopwords: HashSet<String>,
    /// Tope de referencias devueltas por el extractor de citas.
    pub max_references: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            summary: SummaryConfig::default(),
            glossary: GlossaryConfig::default(),
            flashcards: FlashcardConfig::default(),
            concept: ConceptConfig::default(),
            search: SearchConfig::default(),
            methodology: default_methodology(),
            gap_indicators: default_gap_indicators(),
            stopwords: STOPWORDS.iter().map(|s| s.to_string()).collect(),
            max_references: 25,
        }
    }
}

impl EngineConfig {
    /// Carga la configuración por defecto aplicando los ajustes numéricos
    /// presentes en el entorno (usando .env si existe).
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.summary.short_char_budget =
            env_usize("SUMMARY_SHORT_BUDGET", cfg.summary.short_char_budget);
        cfg.summary.detailed_char_budget =
            env_usize("SUMMARY_DETAILED_BUDGET", cfg.summary.detailed_char_budget);
        cfg.glossary.max_terms = env_usize("GLOSSARY_MAX_TERMS", cfg.glossary.max_terms);
        cfg.flashcards.max_cards = env_usize("FLASHCARDS_MAX", cfg.flashcards.max_cards);
        cfg.concept.max_nodes = env_usize("CONCEPT_MAX_NODES", cfg.concept.max_nodes);
        cfg.search.max_results = env_usize("SEARCH_MAX_RESULTS", cfg.search.max_results);
        cfg
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Vocabularios metodológicos por defecto. Se incluyen variantes en plural
/// porque la coincidencia es por token exacto.
fn default_methodology() -> Vec<MethodCategory> {
    vec![
        MethodCategory::new(
            "experimental",
            &[
                "experiment", "experiments", "experimental", "trial", "trials",
                "ablation", "randomized", "treatment", "control",
            ],
        ),
        MethodCategory::new(
            "observational",
            &[
                "observe", "observed", "observational", "cohort",
                "longitudinal", "fieldwork",
            ],
        ),
        MethodCategory::new(
            "qualitative",
            &[
                "interview", "interviews", "survey", "surveys",
                "questionnaire", "questionnaires", "ethnography", "qualitative",
            ],
        ),
        MethodCategory::new(
            "statistical",
            &[
                "regression", "statistical", "statistically", "significance",
                "anova", "correlation", "variance", "bayesian",
            ],
        ),
        MethodCategory::new(
            "computational",
            &[
                "algorithm", "algorithms", "simulation", "simulations",
                "computational", "software", "benchmark", "benchmarks",
            ],
        ),
        MethodCategory::new(
            "theoretical",
            &[
                "theory", "theorem", "theorems", "theoretical", "proof",
                "proofs", "formal", "conceptual",
            ],
        ),
    ]
}

/// Indicadores de limitaciones y trabajo futuro (frases en minúsculas,
/// coincidencia por subcadena sobre la frase normalizada).
fn default_gap_indicators() -> Vec<String> {
    [
        "limitation", "constraint", "drawback", "shortcoming", "weakness",
        "challenge", "future work", "future research", "further study",
        "not addressed", "remains unclear", "needs investigation",
        "open question", "open problem",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
