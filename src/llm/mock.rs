use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{AnswerGenerator, GenerationError};

/// Returns canned answers per question; unknown questions fail.
#[derive(Default)]
pub struct StaticGenerator {
    answers: HashMap<String, String>,
    fallback: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl StaticGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, question: &str, answer: &str) -> Self {
        self.answers.insert(question.to_string(), answer.to_string());
        self
    }

    /// Answer used for any question without a canned one.
    pub fn with_fallback(mut self, answer: &str) -> Self {
        self.fallback = Some(answer.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AnswerGenerator for StaticGenerator {
    async fn generate_answer(&self, question: &str) -> Result<String, GenerationError> {
        self.calls.lock().push(question.to_string());

        self.answers
            .get(question)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| GenerationError::Upstream {
                model: "static".to_string(),
                message: format!("no canned answer for '{question}'"),
            })
    }
}
