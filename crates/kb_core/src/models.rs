use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// A single-turn chat completion: one system message, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: 0.0,
        }
    }
}

#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Sends the request and returns the first choice's text, untrimmed.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
