//! Errores tipados del motor de análisis.
//!
//! Sólo las violaciones estructurales (documento inexistente, parámetro
//! fuera de rango) se propagan como error; los pasos heurísticos degradan
//! a resultados vacíos o a valores de plantilla.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// El identificador no resuelve a ningún documento del almacén.
    #[error("Documento no encontrado: {0}")]
    NotFound(String),

    /// El documento no contiene texto segmentable en frases.
    #[error("El documento '{0}' no contiene texto analizable")]
    EmptyDocument(String),

    /// La operación no puede proceder con el contenido disponible
    /// (p. ej. comparar un documento vacío).
    #[error("Contenido insuficiente en '{0}' para completar la operación")]
    InsufficientContent(String),

    /// Parámetro de la petición fuera de rango.
    #[error("Parámetro inválido: {0}")]
    InvalidInput(String),
}
