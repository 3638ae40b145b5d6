//! Wikidata `wbsearchentities` candidates; page text still comes from Wikipedia.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::error::KbError;
use super::http::{MediaWikiApi, WIKIDATA_API};
use super::rate_limit::RateLimiter;
use super::types::CandidateRecord;
use super::KnowledgeBase;
use crate::constants::DEFAULT_CANDIDATE_LIMIT;

#[derive(Debug, Deserialize)]
pub(crate) struct EntitySearch {
    #[serde(default)]
    pub search: Vec<EntityHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntityHit {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub concepturi: Option<String>,
}

impl EntityHit {
    pub(crate) fn into_candidate(self) -> CandidateRecord {
        let url = self
            .concepturi
            .unwrap_or_else(|| format!("http://www.wikidata.org/entity/{}", self.id));
        CandidateRecord::new(
            self.label.unwrap_or_else(|| self.id.clone()),
            self.id,
            self.description.unwrap_or_default(),
            url,
        )
    }
}

#[derive(Clone)]
pub struct WikidataClient {
    api: MediaWikiApi,
    endpoint: String,
    limit: usize,
}

impl WikidataClient {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self::with_api(MediaWikiApi::new(limiter))
    }

    pub fn with_api(api: MediaWikiApi) -> Self {
        Self {
            api,
            endpoint: WIKIDATA_API.to_string(),
            limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

#[async_trait]
impl KnowledgeBase for WikidataClient {
    async fn search_candidates(&self, name: &str) -> Result<Vec<CandidateRecord>, KbError> {
        let limit = self.limit.to_string();
        let resp: EntitySearch = self
            .api
            .get_json(
                &self.endpoint,
                &[
                    ("action", "wbsearchentities"),
                    ("format", "json"),
                    ("language", "en"),
                    ("search", name),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;

        debug!(mention = name, hits = resp.search.len(), "Wikidata search");

        Ok(resp
            .search
            .into_iter()
            .take(self.limit)
            .map(EntityHit::into_candidate)
            .collect())
    }

    async fn fetch_page_text(&self, title: &str) -> Result<String, KbError> {
        self.api.page_text(title).await
    }
}
