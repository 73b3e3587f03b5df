//! Text generation client
//!
//! A thin blocking client for an OpenAI-compatible chat completions endpoint.
//! The trait seam lets the advice flows run against a canned generator in
//! tests without any network.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SpendwiseError, SpendwiseResult};

/// Anything that can turn a prompt into generated text
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> SpendwiseResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Blocking client for an OpenAI-style chat completions API
pub struct ChatClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

impl TextGenerator for ChatClient {
    fn generate(&self, prompt: &str) -> SpendwiseResult<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.2,
        };

        debug!(model = %self.model, "requesting chat completion");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SpendwiseError::Ai(format!(
                "Completion request failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: ChatResponse = response.json()?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SpendwiseError::Ai("Completion response had no choices".into()))?;

        Ok(content)
    }
}
