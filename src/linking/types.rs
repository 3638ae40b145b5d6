use std::collections::BTreeMap;

pub use crate::kb::CandidateRecord;

/// Candidates per distinct mention surface text.
pub type CandidateMap = BTreeMap<String, Vec<CandidateRecord>>;

/// Best linked entity per distinct mention surface text.
pub type LinkedEntities = BTreeMap<String, LinkedEntity>;

/// The candidate chosen for one mention.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedEntity {
    /// Mention surface text as it appeared in the question/answer.
    pub mention: String,
    /// Chosen KB label; doubles as the page title for evidence retrieval.
    pub label: String,
    pub kb_id: String,
    pub description: String,
    pub url: String,
    /// Cosine similarity of the description to the context, floored at 0.
    pub confidence: f32,
}

impl LinkedEntity {
    pub fn from_candidate(mention: &str, candidate: &CandidateRecord, score: f32) -> Self {
        Self {
            mention: mention.to_string(),
            label: candidate.label.clone(),
            kb_id: candidate.kb_id.clone(),
            description: candidate.description.clone(),
            url: candidate.url.clone(),
            confidence: score.clamp(0.0, 1.0),
        }
    }
}
