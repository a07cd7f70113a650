//! Category commands

use anyhow::Result;
use cofre_core::{Category, Classifier};

pub fn cmd_categories() -> Result<()> {
    println!("🏷️  Categorias disponíveis:");
    for category in Category::all() {
        println!("  - {}", category);
    }
    Ok(())
}

/// Classify a description and print the category, returning it
pub async fn cmd_classify(classifier: &dyn Classifier, description: &str) -> Result<Category> {
    println!("🤖 Classificando com '{}'...", classifier.name());
    let category = classifier.classify(description).await;
    println!("   '{}' → {}", description, category);
    Ok(category)
}
