//! Índice de frecuencias por documento: unigramas, bigramas y la forma
//! superficial preferida de cada término (para etiquetas legibles).

use std::collections::{HashMap, HashSet};

use crate::text::TokenizedDocument;

/// Longitud mínima de un token para entrar en el índice.
const MIN_TOKEN_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct TermFrequencyIndex {
    unigrams: HashMap<String, u32>,
    bigrams: HashMap<String, u32>,
    /// minúscula -> forma superficial (se prefiere la capitalizada).
    surface: HashMap<String, String>,
}

impl TermFrequencyIndex {
    /// Construye el índice a partir del documento tokenizado, excluyendo
    /// stopwords, tokens cortos y tokens puramente numéricos. Los bigramas
    /// no cruzan fronteras de frase.
    pub fn build(doc: &TokenizedDocument, stopwords: &HashSet<String>) -> Self {
        let mut unigrams: HashMap<String, u32> = HashMap::new();
        let mut bigrams: HashMap<String, u32> = HashMap::new();
        let mut surface: HashMap<String, String> = HashMap::new();

        let admissible =
            |t: &str| t.len() >= MIN_TOKEN_LEN && !stopwords.contains(t) && !is_numeric(t);

        for sentence in &doc.sentences {
            for token in &sentence.tokens {
                if admissible(token) {
                    *unigrams.entry(token.clone()).or_insert(0) += 1;
                }
            }
            for pair in sentence.tokens.windows(2) {
                if admissible(&pair[0]) && admissible(&pair[1]) {
                    let bigram = format!("{} {}", pair[0], pair[1]);
                    *bigrams.entry(bigram).or_insert(0) += 1;
                }
            }
            // Formas superficiales desde el texto original de la frase.
            for word in sentence
                .text
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
            {
                let lower = word.to_lowercase();
                match surface.get(&lower) {
                    None => {
                        surface.insert(lower, word.to_string());
                    }
                    Some(existing) => {
                        let existing_capitalized =
                            existing.chars().next().is_some_and(|c| c.is_uppercase());
                        let word_capitalized =
                            word.chars().next().is_some_and(|c| c.is_uppercase());
                        if word_capitalized && !existing_capitalized {
                            surface.insert(lower, word.to_string());
                        }
                    }
                }
            }
        }

        Self {
            unigrams,
            bigrams,
            surface,
        }
    }

    /// Frecuencia de un unigrama o bigrama (insensible a mayúsculas).
    pub fn frequency(&self, term: &str) -> u32 {
        let lower = term.to_lowercase();
        if let Some(n) = self.unigrams.get(&lower) {
            return *n;
        }
        self.bigrams.get(&lower).copied().unwrap_or(0)
    }

    /// Los `n` unigramas más frecuentes, por frecuencia descendente y
    /// desempate alfabético. Determinista.
    pub fn top_terms(&self, n: usize) -> Vec<(String, u32)> {
        let mut terms: Vec<(String, u32)> =
            self.unigrams.iter().map(|(t, f)| (t.clone(), *f)).collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(n);
        terms
    }

    /// Los `n` bigramas más frecuentes, mismo orden que `top_terms`.
    pub fn top_bigrams(&self, n: usize) -> Vec<(String, u32)> {
        let mut terms: Vec<(String, u32)> =
            self.bigrams.iter().map(|(t, f)| (t.clone(), *f)).collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(n);
        terms
    }

    /// Forma superficial preferida de un término en minúsculas. Para
    /// bigramas se resuelve palabra a palabra.
    pub fn surface_form(&self, term: &str) -> String {
        term.split(' ')
            .map(|part| {
                self.surface
                    .get(part)
                    .cloned()
                    .unwrap_or_else(|| part.to_string())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn is_numeric(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TokenizedDocument;

    fn index(text: &str) -> TermFrequencyIndex {
        let doc = TokenizedDocument::build(text);
        let stopwords: HashSet<String> =
            ["the", "a", "of", "is", "this"].iter().map(|s| s.to_string()).collect();
        TermFrequencyIndex::build(&doc, &stopwords)
    }

    #[test]
    fn cuenta_unigramas_sin_stopwords() {
        let idx = index("The model trains the model. The model converges.");
        assert_eq!(idx.frequency("model"), 3);
        assert_eq!(idx.frequency("the"), 0);
    }

    #[test]
    fn top_terms_desempata_alfabeticamente() {
        let idx = index("alpha beta. alpha beta. gamma gamma.");
        let top = idx.top_terms(3);
        assert_eq!(top[0], ("alpha".to_string(), 2));
        assert_eq!(top[1], ("beta".to_string(), 2));
        assert_eq!(top[2], ("gamma".to_string(), 2));
    }

    #[test]
    fn bigramas_no_cruzan_frases() {
        let idx = index("Neural networks converge. Quickly they adapt.");
        assert_eq!(idx.frequency("neural networks"), 1);
        assert_eq!(idx.frequency("converge quickly"), 0);
    }

    #[test]
    fn forma_superficial_prefiere_capitalizada() {
        let idx = index("The transformer improves. Transformer layers stack.");
        assert_eq!(idx.surface_form("transformer"), "Transformer");
    }

    #[test]
    fn numeros_excluidos_del_indice() {
        let idx = index("Results from 2017 and 2017 again.");
        assert_eq!(idx.frequency("2017"), 0);
    }
}
