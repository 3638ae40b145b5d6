//! Wikipedia full-text search candidates.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::KbError;
use super::http::{MediaWikiApi, QueryResponse, wikipedia_url};
use super::rate_limit::RateLimiter;
use super::types::CandidateRecord;
use super::KnowledgeBase;
use crate::constants::DEFAULT_CANDIDATE_LIMIT;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub pageid: Option<u64>,
}

/// Searches Wikipedia titles; description is the first line of each page's intro.
#[derive(Clone)]
pub struct WikipediaClient {
    api: MediaWikiApi,
    limit: usize,
}

impl WikipediaClient {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self::with_api(MediaWikiApi::new(limiter))
    }

    pub fn with_api(api: MediaWikiApi) -> Self {
        Self {
            api,
            limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }

    async fn search_titles(&self, name: &str) -> Result<Vec<SearchHit>, KbError> {
        let limit = self.limit.to_string();
        let endpoint = self.api.wikipedia_endpoint().to_string();
        let resp: QueryResponse<SearchQuery> = self
            .api
            .get_json(
                &endpoint,
                &[
                    ("action", "query"),
                    ("format", "json"),
                    ("formatversion", "2"),
                    ("list", "search"),
                    ("srsearch", name),
                    ("srlimit", limit.as_str()),
                ],
            )
            .await?;

        Ok(resp.query.map(|q| q.search).unwrap_or_default())
    }

    async fn summary(&self, title: &str) -> Result<(String, Option<u64>), KbError> {
        let page = self
            .api
            .query_page(
                title,
                &[
                    ("prop", "extracts|pageprops"),
                    ("ppprop", "disambiguation"),
                    ("exintro", "1"),
                    ("explaintext", "1"),
                ],
            )
            .await?;

        Ok((
            first_line(page.extract.as_deref().unwrap_or_default()),
            page.pageid,
        ))
    }
}

/// First non-empty line of a summary.
pub(crate) fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl KnowledgeBase for WikipediaClient {
    async fn search_candidates(&self, name: &str) -> Result<Vec<CandidateRecord>, KbError> {
        let hits = self.search_titles(name).await?;
        debug!(mention = name, hits = hits.len(), "Wikipedia search");

        let mut candidates = Vec::with_capacity(hits.len());
        for hit in hits.into_iter().take(self.limit) {
            match self.summary(&hit.title).await {
                Ok((description, pageid)) => {
                    let kb_id = pageid.or(hit.pageid).map(|id| id.to_string()).unwrap_or_default();
                    candidates.push(CandidateRecord::new(
                        hit.title.clone(),
                        kb_id,
                        description,
                        wikipedia_url(&hit.title),
                    ));
                }
                Err(e) if e.is_page_error() => {
                    debug!(mention = name, title = %hit.title, error = %e, "Skipping candidate");
                }
                Err(e) => {
                    warn!(mention = name, title = %hit.title, error = %e, "Candidate summary failed");
                }
            }
        }

        Ok(candidates)
    }

    async fn fetch_page_text(&self, title: &str) -> Result<String, KbError> {
        self.api.page_text(title).await
    }
}
