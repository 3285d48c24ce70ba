//! Streaming client for the external text-generation service.
//!
//! Speaks the OpenAI-compatible chat-completion protocol with streaming
//! enabled: the response is an SSE sequence of `data:` lines, each with
//! one incremental text fragment, terminated by `data: [DONE]`. The
//! client consumes the whole stream and hands back a single materialized
//! string, so callers never see partial state.

use std::time::Duration;

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

use super::DiagnosisError;
use crate::config::DiagnosisConfig;

/// Deterministic-leaning sampling for clinical text.
const TEMPERATURE: f32 = 0.1;
/// Ceiling on generated tokens per call.
const MAX_TOKENS: u32 = 1024;

/// Text generation seam for the diagnosis pipeline. One prompt in, one
/// fully materialized string out; implementations consume their own
/// stream to completion before returning.
pub trait TextGenerate {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, DiagnosisError>> + Send;
}

/// Request body for `POST /v1/chat/completions`.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// One SSE event payload from the streaming response.
#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// What one line of the SSE stream contributes.
enum StreamEvent {
    Fragment(String),
    Done,
    Ignore,
}

/// Parse one SSE line. Lines without a `data:` prefix (blank keep-alives,
/// comments) are ignored; a malformed `data:` payload fails the stream.
fn parse_stream_line(line: &str) -> Result<StreamEvent, DiagnosisError> {
    let Some(data) = line.strip_prefix("data:").map(str::trim_start) else {
        return Ok(StreamEvent::Ignore);
    };
    if data == "[DONE]" {
        return Ok(StreamEvent::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| DiagnosisError::Stream(format!("bad event payload: {e}")))?;

    match chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
    {
        Some(fragment) => Ok(StreamEvent::Fragment(fragment)),
        None => Ok(StreamEvent::Ignore),
    }
}

/// HTTP client bound to one service configuration.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl ChatClient {
    pub fn new(config: &DiagnosisConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TextGenerate for ChatClient {
    async fn generate(&self, prompt: &str) -> Result<String, DiagnosisError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: true,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    DiagnosisError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    DiagnosisError::Timeout(self.timeout_secs)
                } else {
                    DiagnosisError::Stream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DiagnosisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // Fragments arrive in order; concatenate until the end marker.
        // SSE lines can straddle network chunks, so buffer the tail.
        let mut stream = response.bytes_stream();
        let mut pending = String::new();
        let mut output = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                if e.is_timeout() {
                    DiagnosisError::Timeout(self.timeout_secs)
                } else {
                    DiagnosisError::Stream(e.to_string())
                }
            })?;
            pending.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(pos) = pending.find('\n') {
                let line: String = pending.drain(..=pos).collect();
                match parse_stream_line(line.trim_end())? {
                    StreamEvent::Fragment(fragment) => output.push_str(&fragment),
                    StreamEvent::Done => return Ok(output),
                    StreamEvent::Ignore => {}
                }
            }
        }

        // Stream ended without a [DONE] marker; an empty stream is valid
        // empty text, whatever arrived is the full response.
        Ok(output)
    }
}

/// Scripted generator for tests: returns the queued responses in order
/// and records every prompt it was given.
pub struct MockGenerator {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, String>>>,
    prompts: std::sync::Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn with_responses(responses: Vec<Result<&str, &str>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock lock").clone()
    }
}

impl TextGenerate for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DiagnosisError> {
        self.prompts
            .lock()
            .expect("mock lock")
            .push(prompt.to_string());

        match self.responses.lock().expect("mock lock").pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(body)) => Err(DiagnosisError::Api { status: 500, body }),
            None => Ok(String::new()),
        }
    }
}
