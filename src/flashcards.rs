//! Generador de tarjetas de estudio a partir de las frases mejor
//! puntuadas. Dos clases de tarjeta: respuesta corta (pregunta de plantilla
//! sobre un término clave, la frase como respuesta) y opción múltiple
//! (hueco en la frase y distractores frecuentes). Determinista.

use crate::config::FlashcardConfig;
use crate::frequency::TermFrequencyIndex;
use crate::models::{CardKind, Flashcard, FlashcardResult};
use crate::summarize::SentenceScore;
use crate::text::TokenizedDocument;

/// Cada tercera tarjeta es de opción múltiple cuando hay distractores.
const MULTIPLE_CHOICE_EVERY: usize = 3;
const DISTRACTORS: usize = 3;

/// Genera exactamente `min(requested, frases disponibles)` tarjetas sin
/// repetir nunca la frase de origen.
pub fn generate_flashcards(
    doc: &TokenizedDocument,
    index: &TermFrequencyIndex,
    scores: &[SentenceScore],
    cfg: &FlashcardConfig,
    requested: usize,
    is_stopword: &dyn Fn(&str) -> bool,
) -> FlashcardResult {
    let requested = requested.min(cfg.max_cards);
    let count = requested.min(doc.sentences.len());

    // Términos frecuentes del documento, fuente de respuestas y distractores.
    let frequent: Vec<String> = index
        .top_terms(cfg.max_cards + DISTRACTORS)
        .into_iter()
        .map(|(t, _)| t)
        .collect();

    let ranked = crate::summarize::ranked_indices(scores);

    let mut flashcards = Vec::with_capacity(count);
    for (card_no, sentence_idx) in ranked.into_iter().take(count).enumerate() {
        let sentence = &doc.sentences[sentence_idx];
        let key = key_term(sentence, index, is_stopword);
        let surface = index.surface_form(&key);

        let multiple = (card_no + 1) % MULTIPLE_CHOICE_EVERY == 0;
        let distractors = pick_distractors(&frequent, &key, index);

        let card = if multiple && distractors.len() >= DISTRACTORS {
            multiple_choice_card(&sentence.text, &key, &surface, &distractors)
        } else {
            Flashcard {
                question: format!("¿Qué se describe sobre '{}' en el artículo?", surface),
                answer: sentence.text.clone(),
                kind: CardKind::ShortAnswer,
            }
        };
        flashcards.push(card);
    }

    FlashcardResult {
        total_cards: flashcards.len(),
        flashcards,
    }
}

/// Token no vacío de mayor frecuencia dentro de la frase.
fn key_term(
    sentence: &crate::text::Sentence,
    index: &TermFrequencyIndex,
    is_stopword: &dyn Fn(&str) -> bool,
) -> String {
    sentence
        .tokens
        .iter()
        .filter(|t| t.len() >= 3 && !is_stopword(t))
        .max_by(|a, b| {
            index
                .frequency(a)
                .cmp(&index.frequency(b))
                // Desempate invertido: gana el alfabéticamente menor.
                .then_with(|| b.as_str().cmp(a.as_str()))
        })
        .cloned()
        .unwrap_or_else(|| {
            sentence
                .tokens
                .first()
                .cloned()
                .unwrap_or_else(|| "documento".to_string())
        })
}

/// Distractores: términos frecuentes distintos de la respuesta, sin
/// reemplazo, en orden de frecuencia.
fn pick_distractors(frequent: &[String], answer: &str, index: &TermFrequencyIndex) -> Vec<String> {
    frequent
        .iter()
        .filter(|t| t.as_str() != answer)
        .take(DISTRACTORS)
        .map(|t| index.surface_form(t))
        .collect()
}

fn multiple_choice_card(
    sentence: &str,
    key: &str,
    surface: &str,
    distractors: &[String],
) -> Flashcard {
    let cloze = cloze_sentence(sentence, key).unwrap_or_else(|| sentence.to_string());

    // Opciones en orden alfabético para no delatar la correcta.
    let mut options: Vec<String> = distractors.to_vec();
    options.push(surface.to_string());
    options.sort_by_key(|o| o.to_lowercase());

    Flashcard {
        question: format!(
            "¿Qué término completa el enunciado? \"{}\" Opciones: {}.",
            cloze,
            options.join(", ")
        ),
        answer: surface.to_string(),
        kind: CardKind::MultipleChoice,
    }
}

/// Sustituye la primera aparición del término (sin distinguir mayúsculas,
/// sólo ASCII) por un hueco. `None` si no se localiza de forma segura.
fn cloze_sentence(sentence: &str, term: &str) -> Option<String> {
    if !term.is_ascii() {
        return None;
    }
    let bytes = sentence.as_bytes();
    let needle = term.as_bytes();
    if needle.is_empty() || bytes.len() < needle.len() {
        return None;
    }
    for start in 0..=bytes.len() - needle.len() {
        if !sentence.is_char_boundary(start) || !sentence.is_char_boundary(start + needle.len()) {
            continue;
        }
        let window = &bytes[start..start + needle.len()];
        if window.eq_ignore_ascii_case(needle) {
            let mut out = String::with_capacity(sentence.len());
            out.push_str(&sentence[..start]);
            out.push_str("____");
            out.push_str(&sentence[start + needle.len()..]);
            return Some(out);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, FlashcardConfig};
    use crate::frequency::TermFrequencyIndex;
    use crate::summarize::{score_sentences, SentenceScore};
    use crate::text::TokenizedDocument;

    const TEXT: &str = "Attention mechanisms allow neural models to focus on relevant parts. \
        This paper proposes a novel transformer architecture for translation. \
        The transformer uses attention layers instead of recurrence. \
        Experiments show improved quality over recurrent baselines. \
        Training converges faster with attention than with recurrence. \
        The evaluation covers three language pairs in both directions.";

    fn setup() -> (TokenizedDocument, TermFrequencyIndex, Vec<SentenceScore>) {
        let engine_cfg = EngineConfig::default();
        let doc = TokenizedDocument::build(TEXT);
        let idx = TermFrequencyIndex::build(&doc, &engine_cfg.stopwords);
        let scores = score_sentences(&doc, &idx, &engine_cfg.summary);
        (doc, idx, scores)
    }

    fn cards(requested: usize) -> FlashcardResult {
        let engine_cfg = EngineConfig::default();
        let (doc, idx, scores) = setup();
        generate_flashcards(
            &doc,
            &idx,
            &scores,
            &FlashcardConfig::default(),
            requested,
            &|t| engine_cfg.is_stopword(t),
        )
    }

    #[test]
    fn genera_exactamente_min_n_frases() {
        assert_eq!(cards(4).total_cards, 4);
        // Más tarjetas que frases: se acota al número de frases.
        assert_eq!(cards(50).total_cards, 6);
    }

    #[test]
    fn sin_frases_de_origen_repetidas() {
        let result = cards(6);
        let mut answers: Vec<&String> = result
            .flashcards
            .iter()
            .filter(|c| c.kind == CardKind::ShortAnswer)
            .map(|c| &c.answer)
            .collect();
        let total = answers.len();
        answers.sort();
        answers.dedup();
        assert_eq!(answers.len(), total);
    }

    #[test]
    fn tercera_tarjeta_es_de_opcion_multiple() {
        let result = cards(6);
        assert_eq!(result.flashcards[2].kind, CardKind::MultipleChoice);
        assert_eq!(result.flashcards[0].kind, CardKind::ShortAnswer);
    }

    #[test]
    fn opcion_multiple_incluye_la_respuesta_entre_opciones() {
        let result = cards(6);
        let mc = result
            .flashcards
            .iter()
            .find(|c| c.kind == CardKind::MultipleChoice)
            .expect("al menos una tarjeta de opción múltiple");
        assert!(mc.question.contains(&mc.answer));
        assert!(mc.question.contains("____"));
    }

    #[test]
    fn hueco_sin_distinguir_mayusculas() {
        let out = cloze_sentence("The Transformer uses attention.", "transformer").unwrap();
        assert_eq!(out, "The ____ uses attention.");
    }

    #[test]
    fn generacion_determinista() {
        assert_eq!(cards(5), cards(5));
    }
}
