use std::fmt;

/// Which search backend proposes candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KbSource {
    #[default]
    Wikipedia,
    Wikidata,
}

impl KbSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wikipedia => "wikipedia",
            Self::Wikidata => "wikidata",
        }
    }

    /// Case-insensitive parse of `wikipedia` / `wikidata`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wikipedia" => Some(Self::Wikipedia),
            "wikidata" => Some(Self::Wikidata),
            _ => None,
        }
    }
}

impl fmt::Display for KbSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One knowledge-base record proposed for a mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    /// Page title / entity label; also the key for [`fetch_page_text`](super::KnowledgeBase::fetch_page_text).
    pub label: String,
    pub kb_id: String,
    /// Short description, embedded during ranking.
    pub description: String,
    pub url: String,
}

impl CandidateRecord {
    pub fn new(
        label: impl Into<String>,
        kb_id: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            kb_id: kb_id.into(),
            description: description.into(),
            url: url.into(),
        }
    }
}
