//! Locally hosted model (Ollama-compatible `/api/generate`).

use super::{GenerationError, GenerationProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct LocalModelConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for LocalModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
        }
    }
}

pub struct LocalModelProvider {
    config: LocalModelConfig,
    client: Client,
}

impl LocalModelProvider {
    pub fn new(config: LocalModelConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/api/generate", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl GenerationProvider for LocalModelProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            format: "json",
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to local model"
        );

        let response = self
            .client
            .post(self.api_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_tolerates_trailing_slash() {
        let provider = LocalModelProvider::new(LocalModelConfig {
            base_url: "http://models.internal:11434/".to_string(),
            model: "llama3".to_string(),
        });
        assert_eq!(provider.api_url(), "http://models.internal:11434/api/generate");
    }

    #[test]
    fn request_asks_for_a_single_json_response() {
        let body = serde_json::to_value(GenerateRequest {
            model: "llama3",
            prompt: "plan a trip",
            stream: false,
            format: "json",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "llama3",
                "prompt": "plan a trip",
                "stream": false,
                "format": "json"
            })
        );
    }
}
