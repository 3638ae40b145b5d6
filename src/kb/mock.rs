//! In-memory knowledge base for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{CandidateRecord, KbError, KnowledgeBase};

/// Canned search results and page texts; records every call.
#[derive(Default)]
pub struct MockKnowledgeBase {
    candidates: HashMap<String, Vec<CandidateRecord>>,
    pages: HashMap<String, String>,
    failing_searches: Vec<String>,
    searches: Mutex<Vec<String>>,
    fetches: Mutex<Vec<String>>,
}

impl MockKnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(mut self, name: &str, candidates: Vec<CandidateRecord>) -> Self {
        self.candidates.insert(name.to_string(), candidates);
        self
    }

    pub fn with_page(mut self, title: &str, text: &str) -> Self {
        self.pages.insert(title.to_string(), text.to_string());
        self
    }

    /// Makes searches for `name` fail with a transport error.
    pub fn with_failing_search(mut self, name: &str) -> Self {
        self.failing_searches.push(name.to_string());
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().clone()
    }
}

#[async_trait]
impl KnowledgeBase for MockKnowledgeBase {
    async fn search_candidates(&self, name: &str) -> Result<Vec<CandidateRecord>, KbError> {
        self.searches.lock().push(name.to_string());

        if self.failing_searches.iter().any(|n| n == name) {
            return Err(KbError::Request {
                endpoint: "mock://search".to_string(),
                message: "connection refused".to_string(),
            });
        }

        Ok(self.candidates.get(name).cloned().unwrap_or_default())
    }

    async fn fetch_page_text(&self, title: &str) -> Result<String, KbError> {
        self.fetches.lock().push(title.to_string());

        self.pages
            .get(title)
            .cloned()
            .ok_or_else(|| KbError::PageNotFound {
                title: title.to_string(),
            })
    }
}
