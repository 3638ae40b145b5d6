//! Rate-limited MediaWiki API access shared by the Wikipedia and Wikidata clients.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::cache::PageCache;
use super::error::KbError;
use super::rate_limit::RateLimiter;

pub const WIKIPEDIA_API: &str = "https://en.wikipedia.org/w/api.php";
pub const WIKIDATA_API: &str = "https://www.wikidata.org/w/api.php";
pub const WIKIPEDIA_PAGE_BASE: &str = "https://en.wikipedia.org/wiki/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("verity/", env!("CARGO_PKG_VERSION"));

/// `action=query` response with `formatversion=2`.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse<T> {
    pub query: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PagesQuery {
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageEntry {
    pub title: String,
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub pageprops: Option<PageProps>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageProps {
    #[serde(default)]
    pub disambiguation: Option<serde_json::Value>,
}

impl PageEntry {
    /// Maps missing and disambiguation pages to page errors.
    pub fn into_checked(self, requested: &str) -> Result<Self, KbError> {
        if self.missing || self.invalid {
            return Err(KbError::PageNotFound {
                title: requested.to_string(),
            });
        }
        if self
            .pageprops
            .as_ref()
            .is_some_and(|props| props.disambiguation.is_some())
        {
            return Err(KbError::AmbiguousPage {
                title: self.title,
            });
        }
        Ok(self)
    }
}

/// HTTP client + shared rate limiter + page cache.
#[derive(Clone)]
pub struct MediaWikiApi {
    http: HttpClient,
    limiter: Arc<RateLimiter>,
    pages: PageCache,
    wikipedia_endpoint: String,
}

impl MediaWikiApi {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self {
            http: HttpClient::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            limiter,
            pages: PageCache::new(),
            wikipedia_endpoint: WIKIPEDIA_API.to_string(),
        }
    }

    /// Points page/summary queries at another MediaWiki endpoint.
    pub fn with_wikipedia_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.wikipedia_endpoint = endpoint.into();
        self
    }

    pub fn wikipedia_endpoint(&self) -> &str {
        &self.wikipedia_endpoint
    }

    pub fn page_cache(&self) -> &PageCache {
        &self.pages
    }

    /// Rate-limited GET returning a deserialized JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, KbError> {
        self.limiter.acquire().await;

        debug!(endpoint, ?params, "MediaWiki request");

        let resp = self
            .http
            .get(endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| KbError::request(endpoint, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(KbError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| KbError::malformed(endpoint, e))
    }

    /// Fetches one page entry by title with the given `prop`s.
    pub(crate) async fn query_page(
        &self,
        title: &str,
        extra: &[(&str, &str)],
    ) -> Result<PageEntry, KbError> {
        let endpoint = self.wikipedia_endpoint.clone();
        let mut params: Vec<(&str, &str)> = vec![
            ("action", "query"),
            ("format", "json"),
            ("formatversion", "2"),
            ("redirects", "1"),
            ("titles", title),
        ];
        params.extend_from_slice(extra);

        let resp: QueryResponse<PagesQuery> = self.get_json(&endpoint, &params).await?;
        resp.query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| KbError::malformed(&endpoint, "no pages in query response"))?
            .into_checked(title)
    }

    /// Full plain-text extract of a page, cached per title.
    pub async fn page_text(&self, title: &str) -> Result<String, KbError> {
        if let Some(text) = self.pages.get(title) {
            debug!(title, "Page text cache hit");
            return Ok(text);
        }

        let page = self
            .query_page(
                title,
                &[
                    ("prop", "extracts|pageprops"),
                    ("ppprop", "disambiguation"),
                    ("explaintext", "1"),
                ],
            )
            .await?;

        let text = page.extract.unwrap_or_default();
        self.pages.insert(title, text.clone());
        Ok(text)
    }
}

/// `https://en.wikipedia.org/wiki/<Title_With_Underscores>`.
pub fn wikipedia_url(title: &str) -> String {
    format!("{}{}", WIKIPEDIA_PAGE_BASE, title.trim().replace(' ', "_"))
}
