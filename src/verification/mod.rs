//! Evidence-based fact verification.
//!
//! Evidence is every sentence of an entity's page that contains a question
//! keyword. The top-k evidence similarities to the generated answer are
//! averaged and compared against the threshold (strictly greater wins).

mod error;
pub mod text;
pub mod types;


use std::sync::Arc;

use tracing::{debug, info, warn};

pub use error::VerificationError;
pub use text::{extract_keywords, find_sentences_with_keyword, keyword_sentences, split_sentences};
pub use types::{EvidenceSentence, Verdict};

use crate::constants::{DEFAULT_EVIDENCE_TOP_K, DEFAULT_VERIFY_THRESHOLD};
use crate::embedding::{Embedder, cosine_similarity};
use crate::extraction::{ExtractedAnswer, YesNo};
use crate::kb::KnowledgeBase;
use crate::linking::{LinkedEntities, LinkedEntity};
use crate::nlp::Tagger;

pub struct FactVerifier {
    kb: Arc<dyn KnowledgeBase>,
    embedder: Arc<dyn Embedder>,
    tagger: Arc<dyn Tagger>,
    threshold: f32,
    top_k: usize,
}

impl FactVerifier {
    pub fn new(
        kb: Arc<dyn KnowledgeBase>,
        embedder: Arc<dyn Embedder>,
        tagger: Arc<dyn Tagger>,
    ) -> Self {
        Self {
            kb,
            embedder,
            tagger,
            threshold: DEFAULT_VERIFY_THRESHOLD,
            top_k: DEFAULT_EVIDENCE_TOP_K,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Verifies `extracted` against page evidence for the linked entities.
    pub async fn verify(
        &self,
        question: &str,
        extracted: &ExtractedAnswer,
        linked: &LinkedEntities,
        answer: &str,
    ) -> Verdict {
        let keywords = extract_keywords(self.tagger.as_ref(), question);
        debug!(?keywords, "Question keywords");

        if keywords.is_empty() {
            debug!("No keywords in question");
            return Verdict::Inconclusive;
        }

        let verdict = match extracted {
            ExtractedAnswer::None => Verdict::Inconclusive,
            ExtractedAnswer::YesNo(claim) => {
                self.verify_yes_no(question, *claim, linked, answer, &keywords)
                    .await
            }
            ExtractedAnswer::Entity(entity) => {
                self.verify_entity(entity, answer, &keywords).await
            }
        };

        info!(%verdict, "Verification finished");
        verdict
    }

    /// The first question entity with keyword evidence decides.
    async fn verify_yes_no(
        &self,
        question: &str,
        claim: YesNo,
        linked: &LinkedEntities,
        answer: &str,
        keywords: &[String],
    ) -> Verdict {
        let mut seen: Vec<String> = Vec::new();

        for mention in self.tagger.extract_entities(question) {
            if seen.contains(&mention.text) {
                continue;
            }
            seen.push(mention.text.clone());

            let Some(entity) = linked.get(&mention.text) else {
                debug!(mention = %mention.text, "Question mention was not linked");
                continue;
            };

            let Some(evidence) = self.evidence_for(entity, keywords).await else {
                continue;
            };

            let Some(average) = self.average_similarity(&evidence, answer) else {
                return Verdict::Inconclusive;
            };

            let supported = average > self.threshold;
            debug!(
                mention = %mention.text,
                average,
                threshold = self.threshold,
                supported,
                "Yes/no evidence"
            );

            return match (claim, supported) {
                (YesNo::Yes, true) | (YesNo::No, false) => Verdict::Correct {
                    confidence: average,
                },
                (YesNo::Yes, false) | (YesNo::No, true) => Verdict::Incorrect {
                    confidence: average,
                },
            };
        }

        Verdict::Inconclusive
    }

    async fn verify_entity(
        &self,
        entity: &LinkedEntity,
        answer: &str,
        keywords: &[String],
    ) -> Verdict {
        let Some(evidence) = self.evidence_for(entity, keywords).await else {
            return Verdict::Inconclusive;
        };

        match self.average_similarity(&evidence, answer) {
            Some(average) if average > self.threshold => Verdict::Correct {
                confidence: average,
            },
            Some(average) => Verdict::Incorrect {
                confidence: average,
            },
            None => Verdict::Inconclusive,
        }
    }

    /// Keyword sentences from the entity's page; `None` when the page is
    /// unavailable or nothing matches.
    async fn evidence_for(&self, entity: &LinkedEntity, keywords: &[String]) -> Option<Vec<String>> {
        let page = match self.kb.fetch_page_text(&entity.label).await {
            Ok(page) => page,
            Err(e) => {
                warn!(title = %entity.label, error = %e, "Page text unavailable");
                return None;
            }
        };

        let sentences = keyword_sentences(&page, keywords);
        debug!(title = %entity.label, count = sentences.len(), "Keyword sentences");

        if sentences.is_empty() {
            None
        } else {
            Some(sentences)
        }
    }

    /// Mean of the top-k evidence similarities; `None` if scoring fails or
    /// there is no evidence.
    fn average_similarity(&self, sentences: &[String], answer: &str) -> Option<f32> {
        let evidence = match self.score_evidence(sentences, answer) {
            Ok(evidence) => evidence,
            Err(e) => {
                warn!(error = %e, "Evidence scoring failed");
                return None;
            }
        };

        if evidence.is_empty() {
            return None;
        }
        Some(evidence.iter().map(|e| e.similarity).sum::<f32>() / evidence.len() as f32)
    }

    /// Top-k sentences by similarity to `target`, best first.
    ///
    /// The target and all sentences are embedded in one batch call.
    pub fn score_evidence(
        &self,
        sentences: &[String],
        target: &str,
    ) -> Result<Vec<EvidenceSentence>, VerificationError> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let mut texts: Vec<&str> = Vec::with_capacity(sentences.len() + 1);
        texts.push(target);
        texts.extend(sentences.iter().map(String::as_str));

        let vectors = self.embedder.embed_batch(&texts)?;
        if vectors.len() != texts.len() {
            return Err(VerificationError::VectorCountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }

        let (target_vector, sentence_vectors) = vectors.split_at(1);
        let mut evidence: Vec<EvidenceSentence> = sentences
            .iter()
            .zip(sentence_vectors)
            .map(|(text, vector)| EvidenceSentence {
                text: text.clone(),
                similarity: cosine_similarity(&target_vector[0], vector),
            })
            .collect();

        evidence.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        evidence.truncate(self.top_k);

        Ok(evidence)
    }
}
