//! Text generation backends.
//!
//! Every backend takes a finished prompt and hands back raw model text. The
//! planner never knows which one is configured.

pub mod cloud;
pub mod local;
pub mod mock;

use async_trait::async_trait;
use futures::StreamExt;
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::Stream;

pub use cloud::{CloudChatConfig, CloudChatProvider};
pub use local::{LocalModelConfig, LocalModelProvider};
pub use mock::MockGenerationProvider;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Ordered text fragments as they arrive from the model.
pub type ProviderStream = Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send>>;

#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Strategy name, used in logs, metrics and `/health`.
    fn name(&self) -> &'static str;

    /// Full response text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Response text as a stream of fragments. Backends without native
    /// streaming yield the whole text as a single fragment.
    async fn generate_stream(&self, prompt: &str) -> Result<ProviderStream, GenerationError> {
        let text = self.generate(prompt).await?;
        Ok(Box::pin(tokio_stream::once(Ok(text))))
    }
}

/// Drains `stream`, concatenating fragments in arrival order. The first
/// error aborts the whole response.
pub async fn collect_stream(mut stream: ProviderStream) -> Result<String, GenerationError> {
    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        text.push_str(&fragment?);
    }
    Ok(text)
}
