use super::*;
use super::http::{PageEntry, QueryResponse, PagesQuery};
use super::wikidata::EntitySearch;
use super::wikipedia::{SearchQuery, first_line};
use std::time::Duration;

mod source_tests {
    use super::*;

    #[test]
    fn test_kb_source_parse() {
        assert_eq!(KbSource::parse("wikipedia"), Some(KbSource::Wikipedia));
        assert_eq!(KbSource::parse(" WikiData "), Some(KbSource::Wikidata));
        assert_eq!(KbSource::parse("dbpedia"), None);
        assert_eq!(KbSource::default(), KbSource::Wikipedia);
        assert_eq!(KbSource::Wikidata.to_string(), "wikidata");
    }
}

mod rate_limit_tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_permit_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(10));
        let start = tokio::time::Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(limiter.permits(), 1);
    }

    #[tokio::test]
    async fn test_consecutive_permits_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(40));
        let start = tokio::time::Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() >= Duration::from_millis(80));
        assert_eq!(limiter.permits(), 3);
    }

    #[tokio::test]
    async fn test_shared_limiter_spaces_concurrent_callers() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(30)));
        let start = tokio::time::Instant::now();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move { limiter.acquire().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(start.elapsed() >= Duration::from_millis(90));
        assert_eq!(limiter.permits(), 4);
    }

    #[tokio::test]
    async fn test_unlimited_never_waits() {
        let limiter = RateLimiter::unlimited();
        let start = tokio::time::Instant::now();
        for _ in 0..50 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}

mod cache_tests {
    use super::*;

    #[test]
    fn test_page_cache_roundtrip() {
        let cache = PageCache::with_capacity(8);
        assert!(cache.is_empty());
        cache.insert("Rome", "Rome is the capital of Italy.".to_string());
        assert_eq!(cache.get("Rome").as_deref(), Some("Rome is the capital of Italy."));
        assert_eq!(cache.get("Paris"), None);
        assert_eq!(cache.len(), 1);
    }
}

mod response_tests {
    use super::*;

    #[test]
    fn test_search_response_parses_titles() {
        let body = r#"{"batchcomplete":true,"query":{"searchinfo":{"totalhits":2},
            "search":[{"ns":0,"title":"Apple Inc.","pageid":856},{"ns":0,"title":"Apple","pageid":18978754}]}}"#;
        let resp: QueryResponse<SearchQuery> = serde_json::from_str(body).unwrap();
        let hits = resp.query.unwrap().search;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Apple Inc.");
        assert_eq!(hits[1].pageid, Some(18978754));
    }

    #[test]
    fn test_missing_page_is_page_not_found() {
        let body = r#"{"query":{"pages":[{"ns":0,"title":"Nowhere Land","missing":true}]}}"#;
        let resp: QueryResponse<PagesQuery> = serde_json::from_str(body).unwrap();
        let page: PageEntry = resp.query.unwrap().pages.into_iter().next().unwrap();
        let err = page.into_checked("Nowhere Land").unwrap_err();
        assert!(matches!(err, KbError::PageNotFound { .. }));
        assert!(err.is_page_error());
    }

    #[test]
    fn test_disambiguation_page_is_ambiguous() {
        let body = r#"{"query":{"pages":[{"pageid":1,"ns":0,"title":"Mercury",
            "extract":"Mercury may refer to:","pageprops":{"disambiguation":""}}]}}"#;
        let resp: QueryResponse<PagesQuery> = serde_json::from_str(body).unwrap();
        let page = resp.query.unwrap().pages.into_iter().next().unwrap();
        assert!(matches!(
            page.into_checked("Mercury"),
            Err(KbError::AmbiguousPage { .. })
        ));
    }

    #[test]
    fn test_regular_page_passes_check() {
        let body = r#"{"query":{"pages":[{"pageid":25458,"ns":0,"title":"Rome",
            "extract":"Rome is the capital city of Italy.\nIt has 2.8 million residents."}]}}"#;
        let resp: QueryResponse<PagesQuery> = serde_json::from_str(body).unwrap();
        let page = resp
            .query
            .unwrap()
            .pages
            .into_iter()
            .next()
            .unwrap()
            .into_checked("Rome")
            .unwrap();
        assert_eq!(page.pageid, Some(25458));
        assert_eq!(
            first_line(page.extract.as_deref().unwrap()),
            "Rome is the capital city of Italy."
        );
    }

    #[test]
    fn test_wikidata_hits_become_candidates() {
        let body = r#"{"search":[
            {"id":"Q312","label":"Apple Inc.","description":"American technology company","concepturi":"http://www.wikidata.org/entity/Q312"},
            {"id":"Q89"}]}"#;
        let resp: EntitySearch = serde_json::from_str(body).unwrap();
        let candidates: Vec<CandidateRecord> = resp
            .search
            .into_iter()
            .map(|hit| hit.into_candidate())
            .collect();

        assert_eq!(candidates[0].label, "Apple Inc.");
        assert_eq!(candidates[0].kb_id, "Q312");
        assert_eq!(candidates[0].description, "American technology company");
        assert_eq!(candidates[1].label, "Q89");
        assert_eq!(candidates[1].url, "http://www.wikidata.org/entity/Q89");
        assert_eq!(candidates[1].description, "");
    }

    #[test]
    fn test_wikipedia_url_uses_underscores() {
        assert_eq!(
            http::wikipedia_url("Apple Inc."),
            "https://en.wikipedia.org/wiki/Apple_Inc."
        );
    }
}

mod mock_tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let kb = MockKnowledgeBase::new()
            .with_candidates(
                "Rome",
                vec![CandidateRecord::new("Rome", "Q220", "capital of Italy", "u")],
            )
            .with_page("Rome", "Rome is old.");

        assert_eq!(kb.search_candidates("Rome").await.unwrap().len(), 1);
        assert!(kb.search_candidates("Paris").await.unwrap().is_empty());
        assert_eq!(kb.fetch_page_text("Rome").await.unwrap(), "Rome is old.");
        assert!(matches!(
            kb.fetch_page_text("Paris").await,
            Err(KbError::PageNotFound { .. })
        ));

        assert_eq!(kb.searches(), vec!["Rome", "Paris"]);
        assert_eq!(kb.fetches(), vec!["Rome", "Paris"]);
    }

    #[tokio::test]
    async fn test_mock_failing_search() {
        let kb = MockKnowledgeBase::new().with_failing_search("Apple");
        assert!(matches!(
            kb.search_candidates("Apple").await,
            Err(KbError::Request { .. })
        ));
    }
}
