//! Hosted chat-completions model (OpenAI-compatible, streamed over SSE).
//!
//! The response is consumed as server-sent events: each `data:` line carries
//! a chunk `{choices: [{delta: {content}}]}` and the stream ends with
//! `data: [DONE]`. Fragments are forwarded in arrival order. A chunk carrying
//! an `error` object aborts the stream, even after content has arrived.

use super::{collect_stream, GenerationError, GenerationProvider, ProviderStream};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

#[derive(Debug, Clone)]
pub struct CloudChatConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Secret<String>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for CloudChatConfig {
    fn default() -> Self {
        Self {
            base_url: "https://integrate.api.nvidia.com/v1".to_string(),
            model: "nvidia/llama-3.1-nemotron-70b-instruct".to_string(),
            api_key: Secret::new(String::new()),
            temperature: 0.5,
            top_p: 1.0,
            max_tokens: 2048,
        }
    }
}

pub struct CloudChatProvider {
    config: CloudChatConfig,
    client: Client,
}

impl CloudChatProvider {
    pub fn new(config: CloudChatConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            max_tokens: self.config.max_tokens,
            stream: true,
        }
    }
}

#[async_trait]
impl GenerationProvider for CloudChatProvider {
    fn name(&self) -> &'static str {
        "cloud"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let stream = self.generate_stream(prompt).await?;
        collect_stream(stream).await
    }

    async fn generate_stream(&self, prompt: &str) -> Result<ProviderStream, GenerationError> {
        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Starting streaming request to cloud chat model"
        );

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut events = EventBuffer::default();

            while let Some(chunk_result) = stream.next().await {
                let chunk = match chunk_result {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx.send(Err(GenerationError::Stream(e.to_string()))).await;
                        return;
                    }
                };
                events.push(&chunk);

                while let Some(event) = events.next_event() {
                    if !forward_event(&tx, &event).await {
                        return;
                    }
                }
            }

            // body closed without [DONE]; whatever is left is the last event
            if let Some(event) = events.finish() {
                forward_event(&tx, &event).await;
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)) as ProviderStream)
    }
}

/// Sends the outcome of one event downstream. Returns false once the stream
/// is over, either because it ended or because the receiver went away.
async fn forward_event(
    tx: &mpsc::Sender<Result<String, GenerationError>>,
    event: &str,
) -> bool {
    match parse_event(event) {
        Ok(SseEvent::Fragment(text)) => tx.send(Ok(text)).await.is_ok(),
        Ok(SseEvent::Empty) => true,
        Ok(SseEvent::Done) => false,
        Err(e) => {
            let _ = tx.send(Err(e)).await;
            false
        }
    }
}

/// Accumulates raw body bytes and splits them into blank-line separated
/// events. Works on bytes so that a UTF-8 sequence split across network
/// chunks is reassembled before decoding.
#[derive(Debug, Default)]
struct EventBuffer {
    buffer: Vec<u8>,
}

impl EventBuffer {
    fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));
    }

    fn next_event(&mut self) -> Option<String> {
        let end = self.buffer.windows(2).position(|w| w == b"\n\n")?;
        let event: Vec<u8> = self.buffer.drain(..end + 2).take(end).collect();
        Some(String::from_utf8_lossy(&event).into_owned())
    }

    fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        let rest = String::from_utf8_lossy(&rest).into_owned();
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}

#[derive(Debug, PartialEq)]
enum SseEvent {
    Fragment(String),
    Done,
    /// Comments, keep-alives, role-only deltas.
    Empty,
}

fn parse_event(event: &str) -> Result<SseEvent, GenerationError> {
    let data: Vec<&str> = event
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.strip_prefix(' ').unwrap_or(data))
        .collect();

    if data.is_empty() {
        return Ok(SseEvent::Empty);
    }

    let data = data.join("\n");
    if data.trim() == "[DONE]" {
        return Ok(SseEvent::Done);
    }

    let chunk: ChatChunk = serde_json::from_str(&data)
        .map_err(|e| GenerationError::InvalidResponse(format!("Malformed stream chunk: {}", e)))?;

    if let Some(error) = chunk.error {
        return Err(GenerationError::Stream(error_message(&error)));
    }

    let text: String = chunk
        .choices
        .into_iter()
        .filter_map(|choice| choice.delta.content)
        .collect();

    if text.is_empty() {
        Ok(SseEvent::Empty)
    } else {
        Ok(SseEvent::Fragment(text))
    }
}

/// `{"error": {"message": ...}}` or `{"error": "..."}`; anything else is
/// reported verbatim.
fn error_message(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}
