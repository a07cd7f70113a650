//! Test utilities for cofre-core
//!
//! Provides a mock Ollama server speaking the subset of the API the
//! classifier uses (`/api/chat`, `/api/show`).

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::classify::keyword_category;

/// Models installed on the mock server by default
pub const DEFAULT_MODELS: &[&str] = &["qwen:7b", "llama3"];

/// Answer given when no keyword matches the description
pub const UNSURE_ANSWER: &str = "Não tenho certeza";

/// Mock Ollama server for testing and development
pub struct MockOllamaServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockOllamaServer {
    /// Start the mock server on an available port with the default models
    pub async fn start() -> Self {
        Self::with_models(DEFAULT_MODELS).await
    }

    /// Start the mock server with a specific set of installed models
    pub async fn with_models(models: &[&str]) -> Self {
        let installed: Arc<Vec<String>> = Arc::new(models.iter().map(|m| m.to_string()).collect());

        let app = Router::new()
            .route("/api/show", post(handle_show))
            .route("/api/chat", post(handle_chat))
            .with_state(installed);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockOllamaServer {
    fn drop(&mut self) {
        self.stop();
    }
}

type Installed = Arc<Vec<String>>;

async fn handle_show(
    State(installed): State<Installed>,
    Json(request): Json<ShowRequest>,
) -> std::result::Result<Json<ShowResponse>, (StatusCode, Json<ErrorResponse>)> {
    if installed.contains(&request.model) {
        Ok(Json(ShowResponse {
            modelfile: format!("FROM {}", request.model),
        }))
    } else {
        Err(model_not_found(&request.model))
    }
}

async fn handle_chat(
    State(installed): State<Installed>,
    Json(request): Json<ChatRequest>,
) -> std::result::Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !installed.contains(&request.model) {
        return Err(model_not_found(&request.model));
    }

    let prompt = request
        .messages
        .last()
        .map(|m| m.content.as_str())
        .unwrap_or_default();
    let description = extract_description(prompt);

    let content = match keyword_category(description) {
        Some(category) => format!("{}\n", category),
        None => UNSURE_ANSWER.to_string(),
    };

    Ok(Json(ChatResponse {
        model: request.model,
        message: ChatMessage {
            role: "assistant".to_string(),
            content,
        },
        done: true,
    }))
}

/// Pull the quoted description out of a classification prompt
fn extract_description(prompt: &str) -> &str {
    prompt
        .split_once("transação '")
        .and_then(|(_, rest)| rest.split_once("' em uma"))
        .map(|(description, _)| description)
        .unwrap_or(prompt)
}

fn model_not_found(model: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("model '{}' not found", model),
        }),
    )
}

#[derive(Debug, Deserialize)]
struct ShowRequest {
    model: String,
}

#[derive(Debug, Serialize)]
struct ShowResponse {
    modelfile: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    model: String,
    message: ChatMessage,
    done: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::build_prompt;

    #[test]
    fn test_extract_description() {
        let prompt = build_prompt("Farmácia São João");
        assert_eq!(extract_description(&prompt), "Farmácia São João");
        assert_eq!(extract_description("plain text"), "plain text");
    }

    #[tokio::test]
    async fn test_mock_server_chat() {
        let server = MockOllamaServer::start().await;
        let client = reqwest::Client::new();

        let response: serde_json::Value = client
            .post(format!("{}/api/chat", server.url()))
            .json(&serde_json::json!({
                "model": "llama3",
                "messages": [{"role": "user", "content": build_prompt("Aluguel março")}],
                "stream": false
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(response["message"]["content"], "Moradia\n");
    }

    #[tokio::test]
    async fn test_mock_server_show_unknown_model() {
        let server = MockOllamaServer::with_models(&["llama3"]).await;
        let client = reqwest::Client::new();

        let status = client
            .post(format!("{}/api/show", server.url()))
            .json(&serde_json::json!({ "model": "qwen:7b" }))
            .send()
            .await
            .unwrap()
            .status();

        assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
    }
}
