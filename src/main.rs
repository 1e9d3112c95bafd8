use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use papermind_engine::cache::AnalysisCache;
use papermind_engine::models::{AnalysisRecord, Artifact};
use papermind_engine::{
    ingest_directory, AnalysisEngine, DocumentStore, EngineConfig, InMemoryStore, MemoryCache,
};

fn main() -> anyhow::Result<()> {
    // 1. Cargar .env e inicializar logging
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 2. Cargar configuración
    let cfg = EngineConfig::from_env();

    // 3. Resolver el directorio de documentos (argumento o PAPERS_DIR)
    let mut args = env::args().skip(1);
    let papers_dir: PathBuf = match args.next() {
        Some(dir) => PathBuf::from(dir),
        None => env::var("PAPERS_DIR")
            .map(PathBuf::from)
            .context("indica un directorio de documentos como argumento o en PAPERS_DIR")?,
    };
    let query = args.next();

    // 4. Ingerir los documentos en el almacén en memoria
    let store = Arc::new(InMemoryStore::new());
    let summary = ingest_directory(&store, &papers_dir)?;
    info!("{summary}");
    if store.is_empty() {
        bail!(
            "no se ha ingerido ningún documento desde {}",
            papers_dir.display()
        );
    }

    // 5. Crear el motor y la caché de resultados
    let engine = AnalysisEngine::new(store.clone(), cfg);
    let cache = MemoryCache::new();

    // 6. Analizar cada documento y cachear los artefactos
    for doc_id in store.ids() {
        info!("📄 Analizando '{doc_id}'...");

        let summary = engine.summarize(&doc_id)?;
        cache.put(&doc_id, AnalysisRecord::new(Artifact::Summary(summary.clone())));
        println!("=== {doc_id} ===");
        println!("{}", serde_json::to_string_pretty(&summary)?);

        let glossary = engine.glossary(&doc_id)?;
        cache.put(&doc_id, AnalysisRecord::new(Artifact::Glossary(glossary.clone())));
        println!("{}", serde_json::to_string_pretty(&glossary)?);

        let cards = engine.flashcards(&doc_id, engine.config().flashcards.default_cards)?;
        cache.put(&doc_id, AnalysisRecord::new(Artifact::Flashcards(cards.clone())));
        println!("{}", serde_json::to_string_pretty(&cards)?);

        let citations = engine.citations(&doc_id)?;
        cache.put(&doc_id, AnalysisRecord::new(Artifact::Citations(citations.clone())));
        println!("{}", serde_json::to_string_pretty(&citations)?);

        let methodology = engine.methodology(&doc_id)?;
        cache.put(
            &doc_id,
            AnalysisRecord::new(Artifact::Methodology(methodology.clone())),
        );
        println!("{}", serde_json::to_string_pretty(&methodology)?);

        let gaps = engine.research_gaps(&doc_id)?;
        cache.put(&doc_id, AnalysisRecord::new(Artifact::ResearchGaps(gaps.clone())));
        println!("{}", serde_json::to_string_pretty(&gaps)?);

        let concepts = engine.concept_map(&doc_id)?;
        cache.put(&doc_id, AnalysisRecord::new(Artifact::ConceptMap(concepts.clone())));
        println!("{}", serde_json::to_string_pretty(&concepts)?);

        if let Some(q) = &query {
            let hits = engine.semantic_search(&doc_id, q)?;
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
    }

    // 7. Comparar los documentos si hay entre dos y tres
    let ids = store.ids();
    if (2..=3).contains(&ids.len()) {
        let comparison = engine.compare(&ids)?;
        println!("=== comparación ===");
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    }

    info!("✅ Análisis completado.");
    Ok(())
}
