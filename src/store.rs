//! Almacén de documentos: el colaborador que entrega texto extraído e
//! inmutable por identificador. El motor nunca extrae texto por sí mismo;
//! si el identificador no resuelve, señala `NotFound`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::error::EngineError;

/// Documento con su texto extraído. Inmutable una vez creado.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub word_count: usize,
    pub page_count: usize,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>, page_count: usize) -> Self {
        let text = text.into();
        let word_count = text.split_whitespace().count();
        Self {
            id: id.into(),
            text,
            word_count,
            page_count,
        }
    }
}

/// Colaborador de texto: resuelve identificadores a documentos inmutables.
pub trait DocumentStore: Send + Sync {
    fn fetch(&self, id: &str) -> Result<Arc<Document>, EngineError>;

    /// Identificadores conocidos, en orden estable.
    fn ids(&self) -> Vec<String>;
}

/// Almacén en memoria. Las lecturas concurrentes comparten `Arc`s, por lo
/// que dos análisis simultáneos del mismo documento sólo leen.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    docs: Mutex<HashMap<String, Arc<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un documento; sobreescribe si el identificador ya existía.
    pub fn insert(&self, doc: Document) {
        let mut docs = self.docs.lock().unwrap();
        docs.insert(doc.id.clone(), Arc::new(doc));
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for InMemoryStore {
    fn fetch(&self, id: &str) -> Result<Arc<Document>, EngineError> {
        let docs = self.docs.lock().unwrap();
        docs.get(id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(id.to_string()))
    }

    fn ids(&self) -> Vec<String> {
        let docs = self.docs.lock().unwrap();
        let mut ids: Vec<String> = docs.keys().cloned().collect();
        ids.sort();
        ids
    }
}
