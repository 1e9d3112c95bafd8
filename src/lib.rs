//! PaperMind Engine: motor de análisis de artículos científicos.
//!
//! Dado un corpus de documentos en texto plano (o PDF ingerido), el motor
//! produce resúmenes extractivos, glosarios técnicos, tarjetas de estudio,
//! citas bibliográficas, clasificación metodológica, huecos de
//! investigación, mapas de conceptos, búsqueda léxica y comparaciones
//! entre documentos. Todo el análisis es determinista y local: no hay
//! modelos externos ni llamadas de red.

pub mod cache;
pub mod citations;
pub mod compare;
pub mod concept_map;
pub mod config;
pub mod engine;
pub mod error;
pub mod flashcards;
pub mod frequency;
pub mod gaps;
pub mod glossary;
pub mod ingest;
pub mod methodology;
pub mod models;
pub mod search;
pub mod store;
pub mod summarize;
pub mod text;

pub use cache::{AnalysisCache, MemoryCache};
pub use config::EngineConfig;
pub use engine::AnalysisEngine;
pub use error::EngineError;
pub use ingest::{ingest_directory, IngestionSummary};
pub use store::{Document, DocumentStore, InMemoryStore};
