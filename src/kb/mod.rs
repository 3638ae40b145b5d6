//! Knowledge-base collaborators: candidate search and page-text retrieval.
//!
//! Every real HTTP call goes through one shared [`RateLimiter`]; page text is
//! cached per title so repeated verification of an entity does not re-fetch.

pub mod cache;
mod error;
pub mod http;
pub mod rate_limit;
pub mod types;
pub mod wikidata;
pub mod wikipedia;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use async_trait::async_trait;

pub use cache::PageCache;
pub use error::KbError;
pub use http::MediaWikiApi;
pub use rate_limit::RateLimiter;
pub use types::{CandidateRecord, KbSource};
pub use wikidata::WikidataClient;
pub use wikipedia::WikipediaClient;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockKnowledgeBase;

#[async_trait]
/// Search + page retrieval over an encyclopedia.
pub trait KnowledgeBase: Send + Sync {
    /// Up to a handful of candidates for `name`; an empty list is not an error.
    async fn search_candidates(&self, name: &str) -> Result<Vec<CandidateRecord>, KbError>;

    /// Plain text of the page titled `title`.
    async fn fetch_page_text(&self, title: &str) -> Result<String, KbError>;
}

/// Builds the client for `source`, sharing `limiter` across all of its calls.
pub fn client_for(source: KbSource, limiter: Arc<RateLimiter>) -> Arc<dyn KnowledgeBase> {
    let api = MediaWikiApi::new(limiter);
    match source {
        KbSource::Wikipedia => Arc::new(WikipediaClient::with_api(api)),
        KbSource::Wikidata => Arc::new(WikidataClient::with_api(api)),
    }
}
