use moka::sync::Cache;

/// Bounded in-memory page-text cache keyed by page title.
#[derive(Clone)]
pub struct PageCache {
    pages: Cache<String, String>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::with_capacity(crate::constants::DEFAULT_PAGE_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` pages (LRU eviction).
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            pages: Cache::builder().max_capacity(capacity).build(),
        }
    }

    #[inline]
    pub fn get(&self, title: &str) -> Option<String> {
        self.pages.get(title)
    }

    #[inline]
    pub fn insert(&self, title: &str, text: String) {
        self.pages.insert(title.to_string(), text);
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.pages.run_pending_tasks();
        self.pages.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}
