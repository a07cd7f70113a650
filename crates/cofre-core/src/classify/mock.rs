//! Keyword-based classifier for testing

use async_trait::async_trait;

use super::Classifier;
use crate::models::Category;

const KEYWORDS: &[(&str, Category)] = &[
    ("supermercado", Category::Alimentacao),
    ("mercado", Category::Alimentacao),
    ("restaurante", Category::Alimentacao),
    ("padaria", Category::Alimentacao),
    ("ifood", Category::Alimentacao),
    ("uber", Category::Transporte),
    ("gasolina", Category::Transporte),
    ("combustível", Category::Transporte),
    ("ônibus", Category::Transporte),
    ("metrô", Category::Transporte),
    ("aluguel", Category::Moradia),
    ("condomínio", Category::Moradia),
    ("energia", Category::Moradia),
    ("farmácia", Category::Saude),
    ("consulta", Category::Saude),
    ("hospital", Category::Saude),
    ("curso", Category::Educacao),
    ("faculdade", Category::Educacao),
    ("livro", Category::Educacao),
    ("cinema", Category::Lazer),
    ("viagem", Category::Lazer),
    ("show", Category::Lazer),
    ("salário", Category::Trabalho),
    ("freela", Category::Trabalho),
    ("internet", Category::Servicos),
    ("celular", Category::Servicos),
    ("iptu", Category::Impostos),
    ("ipva", Category::Impostos),
    ("imposto", Category::Impostos),
    ("roupa", Category::Vestimentas),
    ("sapato", Category::Vestimentas),
    ("tênis", Category::Vestimentas),
    ("tesouro", Category::Investimentos),
    ("cdb", Category::Investimentos),
    ("ações", Category::Investimentos),
];

/// First keyword rule matching the lowercased description
pub(crate) fn keyword_category(description: &str) -> Option<Category> {
    let lower = description.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| *category)
}

/// Deterministic classifier matching well-known keywords
#[derive(Debug, Clone, Default)]
pub struct MockClassifier;

impl MockClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, description: &str) -> Category {
        keyword_category(description).unwrap_or(Category::Outros)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_classify() {
        let classifier = MockClassifier::new();
        assert_eq!(classifier.classify("Supermercado Extra").await, Category::Alimentacao);
        assert_eq!(classifier.classify("UBER *TRIP").await, Category::Transporte);
        assert_eq!(classifier.classify("Salário março").await, Category::Trabalho);
        assert_eq!(classifier.classify("Pagamento IPTU 2024").await, Category::Impostos);
    }

    #[tokio::test]
    async fn test_mock_unknown_is_outros() {
        let classifier = MockClassifier::new();
        assert_eq!(classifier.classify("Transferência PIX").await, Category::Outros);
        assert_eq!(classifier.name(), "mock");
    }
}
