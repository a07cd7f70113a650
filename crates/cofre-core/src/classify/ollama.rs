//! Ollama classifier
//!
//! Sends one chat message per description to `{host}/api/chat` and accepts
//! the answer only when it is an exact category label.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{build_prompt, parse_category, Classifier};
use crate::config::OllamaConfig;
use crate::error::Result;
use crate::models::Category;

/// Classifier backed by a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaClassifier {
    http_client: Client,
    base_url: String,
    model: String,
    fallback_model: String,
}

impl OllamaClassifier {
    /// Create a classifier from settings
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let http_client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http_client,
            base_url: config.host.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            fallback_model: config.fallback_model.clone(),
        })
    }

    /// Model currently used for classification
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the configured model is installed, switching to the
    /// fallback model when it is not
    ///
    /// Returns the model that will be used.
    pub async fn verify_model(&mut self) -> &str {
        match self.model_available(&self.model).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    "Model '{}' not found. Using '{}' as fallback.",
                    self.model, self.fallback_model
                );
                self.model = self.fallback_model.clone();
            }
            Err(e) => {
                warn!(
                    "Could not check model '{}': {}. Using '{}' as fallback.",
                    self.model, e, self.fallback_model
                );
                self.model = self.fallback_model.clone();
            }
        }
        &self.model
    }

    async fn model_available(&self, model: &str) -> Result<bool> {
        let response = self
            .http_client
            .post(format!("{}/api/show", self.base_url))
            .json(&ShowRequest { model })
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Classify a description, surfacing transport and decoding errors
    pub async fn try_classify(&self, description: &str) -> Result<Category> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(description),
            }],
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let chat: ChatResponse = response.json().await?;
        debug!("Ollama response: {}", chat.message.content);

        let category = parse_category(&chat.message.content);
        if category == Category::Outros && chat.message.content.trim() != Category::Outros.as_str() {
            info!(
                "Unrecognized category '{}' for '{}', using Outros",
                chat.message.content.trim(),
                description
            );
        }
        Ok(category)
    }
}

#[async_trait]
impl Classifier for OllamaClassifier {
    async fn classify(&self, description: &str) -> Category {
        match self.try_classify(description).await {
            Ok(category) => category,
            Err(e) => {
                warn!("Classification failed: {}. Using 'Outros'.", e);
                Category::Outros
            }
        }
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ShowRequest<'a> {
    model: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockOllamaServer;

    fn config_for(server: &MockOllamaServer, model: &str) -> OllamaConfig {
        OllamaConfig {
            host: server.url(),
            model: model.to_string(),
            ..OllamaConfig::default()
        }
    }

    #[tokio::test]
    async fn test_classify_via_chat() {
        let server = MockOllamaServer::start().await;
        let classifier = OllamaClassifier::new(&config_for(&server, "qwen:7b")).unwrap();

        assert_eq!(classifier.classify("Supermercado Dia").await, Category::Alimentacao);
        assert_eq!(classifier.classify("Gasolina posto").await, Category::Transporte);
    }

    #[tokio::test]
    async fn test_unrecognized_answer_is_outros() {
        let server = MockOllamaServer::start().await;
        let classifier = OllamaClassifier::new(&config_for(&server, "qwen:7b")).unwrap();

        // the mock answers with free text when no keyword matches
        assert_eq!(classifier.classify("Transferência PIX").await, Category::Outros);
    }

    #[tokio::test]
    async fn test_verify_model_keeps_installed_model() {
        let server = MockOllamaServer::start().await;
        let mut classifier = OllamaClassifier::new(&config_for(&server, "qwen:7b")).unwrap();

        assert_eq!(classifier.verify_model().await, "qwen:7b");
    }

    #[tokio::test]
    async fn test_verify_model_falls_back() {
        let server = MockOllamaServer::with_models(&["llama3"]).await;
        let mut classifier = OllamaClassifier::new(&config_for(&server, "qwen:7b")).unwrap();

        // before verification the missing model makes chat fail
        assert_eq!(classifier.classify("Uber").await, Category::Outros);
        assert!(classifier.try_classify("Uber").await.is_err());

        assert_eq!(classifier.verify_model().await, "llama3");
        assert_eq!(classifier.name(), "llama3");
        assert_eq!(classifier.classify("Uber").await, Category::Transporte);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_outros() {
        let config = OllamaConfig {
            host: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..OllamaConfig::default()
        };
        let mut classifier = OllamaClassifier::new(&config).unwrap();

        assert_eq!(classifier.classify("Supermercado").await, Category::Outros);
        assert_eq!(classifier.verify_model().await, "llama3");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = OllamaConfig {
            host: "http://localhost:11434/".to_string(),
            ..OllamaConfig::default()
        };
        let classifier = OllamaClassifier::new(&config).unwrap();
        assert_eq!(classifier.base_url(), "http://localhost:11434");
        assert_eq!(classifier.model(), "qwen:7b");
    }
}
