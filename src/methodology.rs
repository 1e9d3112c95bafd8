//! Clasificador metodológico por cubos de palabras clave: cuenta
//! ocurrencias (por token, sin distinguir mayúsculas) de los vocabularios
//! configurados y redacta un resumen narrativo. Cero coincidencias no es
//! un error.

use std::collections::HashMap;

use crate::config::MethodCategory;
use crate::models::{MethodCount, MethodologyResult};
use crate::text::TokenizedDocument;

/// Clasifica el documento contra las categorías dadas. Devuelve sólo las
/// categorías con al menos una coincidencia, de mayor a menor recuento con
/// desempate alfabético.
pub fn classify_methodology(
    doc: &TokenizedDocument,
    categories: &[MethodCategory],
) -> MethodologyResult {
    let mut token_counts: HashMap<&str, u32> = HashMap::new();
    for token in &doc.tokens {
        *token_counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<MethodCount> = categories
        .iter()
        .filter_map(|category| {
            let matches: u32 = category
                .keywords
                .iter()
                .map(|kw| count_keyword(doc, &token_counts, kw))
                .sum();
            (matches > 0).then(|| MethodCount {
                category: category.name.clone(),
                matches,
            })
        })
        .collect();
    counts.sort_by(|a, b| {
        b.matches
            .cmp(&a.matches)
            .then_with(|| a.category.cmp(&b.category))
    });

    let research_methods: Vec<String> = counts.iter().map(|c| c.category.clone()).collect();
    let methodology_analysis = narrative(&counts);

    MethodologyResult {
        methodology_analysis,
        research_methods,
        method_counts: counts,
    }
}

/// Ocurrencias de una palabra clave. Las claves de una sola palabra se
/// cuentan por token exacto; las frases, por ventana deslizante dentro de
/// cada frase.
fn count_keyword(
    doc: &TokenizedDocument,
    token_counts: &HashMap<&str, u32>,
    keyword: &str,
) -> u32 {
    let parts: Vec<&str> = keyword.split(' ').collect();
    if parts.len() == 1 {
        return token_counts.get(keyword).copied().unwrap_or(0);
    }
    let mut total = 0u32;
    for sentence in &doc.sentences {
        for window in sentence.tokens.windows(parts.len()) {
            if window.iter().zip(&parts).all(|(t, p)| t == p) {
                total += 1;
            }
        }
    }
    total
}

fn narrative(counts: &[MethodCount]) -> String {
    if counts.is_empty() {
        return "No se han detectado señales metodológicas claras en el documento.".to_string();
    }
    let listed: Vec<String> = counts
        .iter()
        .take(3)
        .map(|c| format!("{} ({} coincidencias)", c.category, c.matches))
        .collect();
    format!(
        "Diseño de investigación predominante: {}. Categorías detectadas en total: {}.",
        listed.join(", "),
        counts.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::text::TokenizedDocument;

    fn classify(text: &str) -> MethodologyResult {
        let cfg = EngineConfig::default();
        let doc = TokenizedDocument::build(text);
        classify_methodology(&doc, &cfg.methodology)
    }

    #[test]
    fn detecta_categoria_experimental() {
        let result = classify(
            "Attention mechanisms allow models to focus on relevant parts of input. \
             This paper proposes a new Transformer architecture. \
             Experiments show improved BLEU scores.",
        );
        assert!(result
            .research_methods
            .contains(&"experimental".to_string()));
    }

    #[test]
    fn ordena_por_recuento_descendente() {
        let result = classify(
            "We ran an experiment. Another experiment followed. \
             The algorithm converged. Regression was not used.",
        );
        assert_eq!(result.method_counts[0].category, "experimental");
        assert!(result.method_counts[0].matches >= 2);
    }

    #[test]
    fn cero_coincidencias_no_es_error() {
        let result = classify("Bland prose with no relevant vocabulary at all.");
        assert!(result.research_methods.is_empty());
        assert!(result
            .methodology_analysis
            .contains("No se han detectado señales"));
    }

    #[test]
    fn frases_clave_multipalabra() {
        let cfg = vec![crate::config::MethodCategory {
            name: "propio".to_string(),
            keywords: vec!["control group".to_string()],
        }];
        let doc = TokenizedDocument::build("The control group improved. The control group agreed.");
        let result = classify_methodology(&doc, &cfg);
        assert_eq!(result.method_counts[0].matches, 2);
    }
}
