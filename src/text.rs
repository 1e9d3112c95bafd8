//! Segmentación de texto: frases, tokens y la representación tokenizada
//! que el resto de componentes reutiliza sin volver a escanear el texto.

use std::collections::HashSet;

/// Abreviaturas habituales en artículos científicos que no cierran frase.
/// La lista es una heurística conocida, no una garantía.
const ABBREVIATIONS: &[&str] = &[
    "et al.", "e.g.", "i.e.", "cf.", "vs.", "etc.", "fig.", "Fig.", "eq.",
    "Eq.", "no.", "No.", "Dr.", "Prof.", "approx.", "resp.",
];

/// Frase con sus tokens precalculados.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<String>,
    pub token_set: HashSet<String>,
}

/// Documento tokenizado una sola vez; todos los análisis de una sesión
/// trabajan sobre esta representación inmutable.
#[derive(Debug, Clone)]
pub struct TokenizedDocument {
    pub sentences: Vec<Sentence>,
    /// Todos los tokens del documento, en orden y en minúsculas.
    pub tokens: Vec<String>,
}

impl TokenizedDocument {
    pub fn build(text: &str) -> Self {
        let mut sentences = Vec::new();
        let mut tokens = Vec::new();
        for raw in split_sentences(text) {
            let sentence_tokens = tokenize(&raw);
            tokens.extend(sentence_tokens.iter().cloned());
            let token_set = sentence_tokens.iter().cloned().collect();
            sentences.push(Sentence {
                text: raw,
                tokens: sentence_tokens,
                token_set,
            });
        }
        Self { sentences, tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Divide el texto en frases. Frontera: `.`, `!` o `?` seguido de espacio
/// en blanco y mayúscula, o fin de texto. Nunca descarta contenido: si no
/// hay frontera válida, el texto completo es una única frase.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if c == '.' || c == '!' || c == '?' {
            let candidate: String = chars[start..=i].iter().collect();
            let is_abbrev =
                c == '.' && ABBREVIATIONS.iter().any(|a| candidate.trim_end().ends_with(a));

            // Mirar hacia delante: espacio y mayúscula, o fin de texto.
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            let at_end = j >= chars.len();
            let next_starts_sentence = !at_end && j > i + 1 && chars[j].is_uppercase();

            if !is_abbrev && (at_end || next_starts_sentence) {
                let trimmed = candidate.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                start = j;
                i = j;
                continue;
            }
        }
        i += 1;
    }

    if start < chars.len() {
        let tail: String = chars[start..].iter().collect();
        let trimmed = tail.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
    }

    sentences
}

/// Tokeniza en palabras minúsculas sin puntuación. Determinista.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Colapsa espacios y líneas en blanco repetidas.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_blank = false;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !last_blank && !out.is_empty() {
                out.push('\n');
            }
            last_blank = true;
            continue;
        }
        last_blank = false;
        let mut first = true;
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        for word in line.split_whitespace() {
            if !first {
                out.push(' ');
            }
            out.push_str(word);
            first = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_en_fronteras_simples() {
        let s = split_sentences("First sentence. Second sentence! Third one?");
        assert_eq!(s.len(), 3);
        assert_eq!(s[0], "First sentence.");
        assert_eq!(s[2], "Third one?");
    }

    #[test]
    fn respeta_abreviaturas() {
        let s = split_sentences("As shown by Smith et al. The result holds.");
        // "et al." no cierra la frase aunque siga una mayúscula.
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn sin_frontera_todo_es_una_frase() {
        let s = split_sentences("lowercase text without terminator");
        assert_eq!(s, vec!["lowercase text without terminator".to_string()]);
    }

    #[test]
    fn minuscula_tras_punto_no_abre_frase() {
        let s = split_sentences("Version 2.0 of the model. it was fast");
        // "it" en minúscula: el punto no cuenta como frontera.
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn texto_vacio_sin_frases() {
        assert!(split_sentences("   \n ").is_empty());
        assert!(TokenizedDocument::build("").is_empty());
    }

    #[test]
    fn tokeniza_en_minusculas_sin_puntuacion() {
        let t = tokenize("The Transformer, described in (Vaswani, 2017).");
        assert_eq!(
            t,
            vec!["the", "transformer", "described", "in", "vaswani", "2017"]
        );
    }

    #[test]
    fn tokenizacion_estable() {
        let text = "Attention is all you need. Repeat it.";
        assert_eq!(
            TokenizedDocument::build(text).tokens,
            TokenizedDocument::build(text).tokens
        );
    }

    #[test]
    fn normaliza_espacios() {
        let n = normalize_whitespace("a   b\n\n\n\nc  d");
        assert_eq!(n, "a b\nc d");
    }
}
