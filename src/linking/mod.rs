//! Entity linking: candidate generation, embedding-based ranking and
//! per-mention deduplication.

pub mod types;


use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, warn};

pub use types::{CandidateMap, CandidateRecord, LinkedEntities, LinkedEntity};

use crate::embedding::{Embedder, EmbeddingError, cosine_similarity};
use crate::kb::KnowledgeBase;
use crate::nlp::Mention;

/// Links mentions to knowledge-base records.
#[derive(Clone)]
pub struct EntityLinker {
    kb: Arc<dyn KnowledgeBase>,
    embedder: Arc<dyn Embedder>,
}

impl EntityLinker {
    pub fn new(kb: Arc<dyn KnowledgeBase>, embedder: Arc<dyn Embedder>) -> Self {
        Self { kb, embedder }
    }

    /// Searches candidates once per distinct mention text.
    ///
    /// A failed search is logged and yields an empty list for that mention.
    pub async fn generate_candidates(&self, mentions: &[Mention]) -> CandidateMap {
        let mut map = CandidateMap::new();

        for mention in mentions {
            if map.contains_key(&mention.text) {
                continue;
            }

            let candidates = match self.kb.search_candidates(&mention.text).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(mention = %mention.text, error = %e, "Candidate search failed");
                    Vec::new()
                }
            };

            debug!(mention = %mention.text, count = candidates.len(), "Generated candidates");
            map.insert(mention.text.clone(), candidates);
        }

        map
    }

    /// Picks the top candidate per mention by description/context similarity.
    ///
    /// `context` falls back to the mention text when blank. Mentions without
    /// candidates, or whose scoring fails, produce no entry.
    pub fn rank_candidates(&self, context: &str, candidates: &CandidateMap) -> Vec<LinkedEntity> {
        let shared_context = if context.trim().is_empty() {
            None
        } else {
            match self.embedder.embed(context) {
                Ok(vector) => Some(vector),
                Err(e) => {
                    warn!(error = %e, "Context embedding failed; ranking skipped");
                    return Vec::new();
                }
            }
        };

        let mut linked = Vec::new();
        for (mention, records) in candidates {
            if records.is_empty() {
                continue;
            }

            let context_vector = match &shared_context {
                Some(vector) => vector.clone(),
                None => match self.embedder.embed(mention) {
                    Ok(vector) => vector,
                    Err(e) => {
                        warn!(mention = %mention, error = %e, "Mention embedding failed");
                        continue;
                    }
                },
            };

            match self.score_candidates(&context_vector, records) {
                Ok(ranked) => {
                    if let Some((best, score)) = ranked.first() {
                        debug!(
                            mention = %mention,
                            label = %best.label,
                            score,
                            "Linked mention"
                        );
                        linked.push(LinkedEntity::from_candidate(mention, best, *score));
                    }
                }
                Err(e) => {
                    warn!(mention = %mention, error = %e, "Candidate ranking failed");
                }
            }
        }

        linked
    }

    /// Candidates sorted by descending cosine similarity to `context_vector`.
    fn score_candidates<'a>(
        &self,
        context_vector: &[f32],
        records: &'a [CandidateRecord],
    ) -> Result<Vec<(&'a CandidateRecord, f32)>, EmbeddingError> {
        let descriptions: Vec<&str> = records.iter().map(|c| c.description.as_str()).collect();
        let vectors = self.embedder.embed_batch(&descriptions)?;

        let mut scored: Vec<(&CandidateRecord, f32)> = records
            .iter()
            .zip(vectors.iter())
            .map(|(record, vector)| (record, cosine_similarity(context_vector, vector)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        Ok(scored)
    }

    /// Collapses entries sharing a mention, keeping the highest confidence.
    pub fn best_per_mention(linked: Vec<LinkedEntity>) -> LinkedEntities {
        let mut best = LinkedEntities::new();
        for entity in linked {
            match best.get(&entity.mention) {
                Some(existing) if existing.confidence >= entity.confidence => {}
                _ => {
                    best.insert(entity.mention.clone(), entity);
                }
            }
        }
        best
    }

    /// Full linking pass: search, rank against `context`, dedupe.
    pub async fn link(&self, mentions: &[Mention], context: &str) -> LinkedEntities {
        let candidates = self.generate_candidates(mentions).await;
        Self::best_per_mention(self.rank_candidates(context, &candidates))
    }
}
