//! Answer generation collaborators.

mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::debug;

pub use error::GenerationError;

#[cfg(any(test, feature = "mock"))]
pub use mock::StaticGenerator;

use crate::constants::DEFAULT_GENERATION_MAX_TOKENS;

/// Completions are cut at the first follow-up question marker.
const STOP_MARKER: &str = "Q:";

#[async_trait]
/// Produces a free-text answer for a question.
pub trait AnswerGenerator: Send + Sync {
    async fn generate_answer(&self, question: &str) -> Result<String, GenerationError>;
}

/// Chat-completion generator routed through `genai` (provider chosen by model name).
pub struct ChatGenerator {
    client: Client,
    model: String,
    max_tokens: u32,
}

impl ChatGenerator {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
            max_tokens: DEFAULT_GENERATION_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AnswerGenerator for ChatGenerator {
    async fn generate_answer(&self, question: &str) -> Result<String, GenerationError> {
        let request = ChatRequest::new(vec![ChatMessage::user(question)]);
        let options = ChatOptions::default().with_max_tokens(self.max_tokens);

        let resp = self
            .client
            .exec_chat(&self.model, request, Some(&options))
            .await
            .map_err(|e| GenerationError::Upstream {
                model: self.model.clone(),
                message: e.to_string(),
            })?;

        let answer = clean_completion(resp.first_text().unwrap_or_default());
        debug!(model = %self.model, answer = %answer, "Generated answer");

        if answer.is_empty() {
            return Err(GenerationError::EmptyCompletion {
                model: self.model.clone(),
            });
        }
        Ok(answer)
    }
}

/// Trims a completion, cuts it at [`STOP_MARKER`] and flattens line breaks.
pub fn clean_completion(raw: &str) -> String {
    let head = raw.split(STOP_MARKER).next().unwrap_or_default();
    head.split_whitespace().collect::<Vec<_>>().join(" ")
}
