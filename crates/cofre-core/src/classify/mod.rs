//! Transaction category classification
//!
//! A [`Classifier`] maps a free-text description to one of the closed set of
//! [`Category`] labels. Classification never fails: an unusable answer or a
//! backend error falls back to [`Category::Outros`].
//!
//! - `OllamaClassifier`: asks a local Ollama model
//! - `MockClassifier`: deterministic keyword rules, for tests and offline use
//!
//! ```rust,ignore
//! let mut classifier = OllamaClassifier::new(&config.ollama)?;
//! classifier.verify_model().await;
//! let category = classifier.classify("Supermercado Dia").await;
//! ```

mod mock;
mod ollama;

pub use mock::MockClassifier;
pub use ollama::OllamaClassifier;

#[cfg(any(test, feature = "test-utils"))]
pub(crate) use mock::keyword_category;

use async_trait::async_trait;

use crate::models::Category;

/// Assigns a category to a transaction description
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify a description, falling back to `Outros`
    async fn classify(&self, description: &str) -> Category;

    /// Name of the model or backend answering
    fn name(&self) -> &str;
}

/// Build the classification prompt sent to the model
pub fn build_prompt(description: &str) -> String {
    let labels: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    format!(
        "Classifique a transação '{}' em uma destas categorias: {}. \
         Responda APENAS com o nome exato da categoria em português.",
        description,
        labels.join(", ")
    )
}

/// Interpret a model answer
///
/// Only an exact label (after trimming whitespace) is accepted; anything
/// else is `Outros`.
pub fn parse_category(response: &str) -> Category {
    Category::from_label_or_other(response)
}
