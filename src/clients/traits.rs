use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::schemas::{ChatMessage, Snippet};

/// Body of an OpenAI-compatible chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: 0.7,
            max_tokens: 1024,
            top_p: 1.0,
            stream: false,
        }
    }

    pub fn with_sampling(mut self, sampling: crate::config::SamplingConfig) -> Self {
        self.temperature = sampling.temperature;
        self.max_tokens = sampling.max_tokens;
        self.top_p = sampling.top_p;
        self
    }
}

/// Language-completion (and vision) service
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the first choice's text, or an empty string when the model sent none
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// Web search service
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Snippet>>;
}
