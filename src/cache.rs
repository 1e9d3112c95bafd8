//! Caché explícita de artefactos por (documento, clase de artefacto).
//! La invalidación la controla el llamante; recomputar y sobreescribir es
//! seguro con semántica de último escritor.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::{AnalysisRecord, ArtifactKind};

pub trait AnalysisCache: Send + Sync {
    fn get(&self, doc_id: &str, kind: ArtifactKind) -> Option<AnalysisRecord>;

    fn put(&self, doc_id: &str, record: AnalysisRecord);

    /// Elimina todos los artefactos de un documento (p. ej. tras regenerar
    /// su texto).
    fn invalidate(&self, doc_id: &str);
}

/// Implementación en memoria.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<(String, ArtifactKind), AnalysisRecord>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnalysisCache for MemoryCache {
    fn get(&self, doc_id: &str, kind: ArtifactKind) -> Option<AnalysisRecord> {
        let entries = self.entries.lock().unwrap();
        entries.get(&(doc_id.to_string(), kind)).cloned()
    }

    fn put(&self, doc_id: &str, record: AnalysisRecord) {
        let kind = record.artifact.kind();
        let mut entries = self.entries.lock().unwrap();
        entries.insert((doc_id.to_string(), kind), record);
    }

    fn invalidate(&self, doc_id: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|(id, _), _| id != doc_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Artifact, SummaryResult};

    fn record(short: &str) -> AnalysisRecord {
        AnalysisRecord::new(Artifact::Summary(SummaryResult {
            short_summary: short.to_string(),
            detailed_summary: short.to_string(),
            total_words: 1,
        }))
    }

    #[test]
    fn ultimo_escritor_gana() {
        let cache = MemoryCache::new();
        cache.put("doc", record("primero"));
        cache.put("doc", record("segundo"));
        let got = cache.get("doc", ArtifactKind::Summary).unwrap();
        match got.artifact {
            Artifact::Summary(s) => assert_eq!(s.short_summary, "segundo"),
            _ => panic!("clase de artefacto inesperada"),
        }
    }

    #[test]
    fn invalidate_borra_solo_el_documento() {
        let cache = MemoryCache::new();
        cache.put("a", record("x"));
        cache.put("b", record("y"));
        cache.invalidate("a");
        assert!(cache.get("a", ArtifactKind::Summary).is_none());
        assert!(cache.get("b", ArtifactKind::Summary).is_some());
    }
}
