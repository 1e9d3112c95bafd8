//! Ingesta de un directorio del sistema de archivos: extrae el texto de
//! cada fichero soportado, lo limpia y lo registra en el almacén de
//! documentos usando el nombre de fichero como identificador.

use std::{fs, path::Path};

use anyhow::{anyhow, Result};
use mime_guess::MimeGuess;
use regex::Regex;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::store::{Document, InMemoryStore};

/// Longitud mínima de texto limpio para considerar útil un fichero.
const MIN_TEXT_LEN: usize = 100;

/// Caracteres estimados por página cuando el PDF no trae saltos de página.
const CHARS_PER_PAGE: usize = 1800;

/// Resumen de los resultados de una operación de ingesta.
#[derive(Debug, Default)]
pub struct IngestionSummary {
    pub files_scanned: u32,
    pub files_ingested: u32,
    pub files_skipped: u32,
}

impl std::fmt::Display for IngestionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Resumen: {} ficheros escaneados, {} ingeridos, {} omitidos.",
            self.files_scanned, self.files_ingested, self.files_skipped
        )
    }
}

/// Limpiador de texto extraído, con los patrones compilados una sola vez.
struct TextCleaner {
    urls: Regex,
    emails: Regex,
    page_numbers: Regex,
    control: Regex,
}

impl TextCleaner {
    fn new() -> Self {
        Self {
            urls: Regex::new(r"https?://\S+").expect("patrón de URL válido"),
            emails: Regex::new(r"\S+@\S+\.\S+").expect("patrón de email válido"),
            page_numbers: Regex::new(r"(?m)^\s*(Page )?\d+\s*$").expect("patrón de página válido"),
            control: Regex::new(r"[\x00-\x08\x0b\x0e-\x1f\x7f]").expect("patrón de control válido"),
        }
    }

    /// Normaliza el texto en bruto: quita URLs, emails, números de página
    /// sueltos y caracteres de control, y colapsa el espacio en blanco.
    fn clean(&self, text: &str) -> String {
        let text = self.urls.replace_all(text, "");
        let text = self.emails.replace_all(&text, "");
        let text = self.page_numbers.replace_all(&text, "");
        let text = self.control.replace_all(&text, "");
        crate::text::normalize_whitespace(&text)
    }
}

/// Recorre recursivamente un directorio, extrayendo texto de los ficheros
/// soportados y registrando cada documento en el almacén.
pub fn ingest_directory(store: &InMemoryStore, root: &Path) -> Result<IngestionSummary> {
    if !root.is_dir() {
        return Err(anyhow!("La ruta no es un directorio: {}", root.display()));
    }

    let cleaner = TextCleaner::new();
    let mut summary = IngestionSummary::default();

    let file_entries: Vec<_> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();

    for entry in &file_entries {
        summary.files_scanned += 1;
        let path = entry.path();
        match ingest_file(&cleaner, path) {
            Ok(Some(doc)) => {
                info!(
                    "Ingerido '{}': {} palabras, {} páginas estimadas.",
                    doc.id, doc.word_count, doc.page_count
                );
                store.insert(doc);
                summary.files_ingested += 1;
            }
            Ok(None) => {
                summary.files_skipped += 1;
            }
            Err(err) => {
                warn!("Error ingiriendo {}: {err}", path.display());
                summary.files_skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn ingest_file(cleaner: &TextCleaner, path: &Path) -> Result<Option<Document>> {
    let extension = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("");

    let raw = match extension.to_lowercase().as_str() {
        "pdf" => match pdf_extract::extract_text(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "No se pudo extraer texto del PDF {}: {}. Saltando fichero.",
                    path.display(),
                    e
                );
                return Ok(None);
            }
        },
        "txt" | "md" => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                warn!("Saltando fichero no-UTF8: {}", path.display());
                return Ok(None);
            }
        },
        _ => {
            let mime: MimeGuess = MimeGuess::from_path(path);
            info!(
                "Saltando fichero con extensión no soportada ('.{}', mime {:?}): {}",
                extension,
                mime.first(),
                path.display()
            );
            return Ok(None);
        }
    };

    let page_count = estimate_pages(&raw);
    let text = cleaner.clean(&raw);

    if text.len() < MIN_TEXT_LEN {
        warn!("Fichero vacío o sin texto útil: {}", path.display());
        return Ok(None);
    }

    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    Ok(Some(Document::new(filename, text, page_count)))
}

/// Número de páginas: saltos de página explícitos si los hay; si no,
/// estimación por longitud.
fn estimate_pages(raw: &str) -> usize {
    let form_feeds = raw.matches('\u{c}').count();
    if form_feeds > 0 {
        form_feeds + 1
    } else {
        raw.len() / CHARS_PER_PAGE + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limpia_urls_y_emails() {
        let cleaner = TextCleaner::new();
        let out = cleaner.clean("See https://example.org/x and mail a@b.com now.");
        assert!(!out.contains("https://"));
        assert!(!out.contains("a@b.com"));
        assert!(out.contains("See"));
    }

    #[test]
    fn estima_paginas_por_saltos() {
        assert_eq!(estimate_pages("a\u{c}b\u{c}c"), 3);
        assert_eq!(estimate_pages("corto"), 1);
    }
}
