//! Answer extraction: turns a generated answer into a yes/no value or a
//! linked entity.

pub mod fuzzy;
pub mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{debug, warn};

pub use crate::constants::DEFAULT_MATCH_THRESHOLD;
pub use types::{ExtractedAnswer, SpanReader, YesNo, YesNoJudge};

use crate::classifier::QuestionCategory;
use crate::linking::{LinkedEntities, LinkedEntity};

pub struct AnswerExtractor {
    judge: Arc<dyn YesNoJudge>,
    reader: Arc<dyn SpanReader>,
    threshold: f32,
}

impl AnswerExtractor {
    pub fn new(judge: Arc<dyn YesNoJudge>, reader: Arc<dyn SpanReader>) -> Self {
        Self {
            judge,
            reader,
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    /// Sets the fuzzy-match threshold a span must strictly exceed.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Extracts the answer according to the question's category.
    ///
    /// Collaborator failures are logged and produce [`ExtractedAnswer::None`].
    pub fn extract(
        &self,
        category: QuestionCategory,
        question: &str,
        answer: &str,
        linked: &LinkedEntities,
    ) -> ExtractedAnswer {
        match category {
            QuestionCategory::YesNo => match self.judge.judge(question, answer) {
                Ok(verdict) => ExtractedAnswer::YesNo(verdict),
                Err(e) => {
                    warn!(error = %e, "Yes/no judgment failed");
                    ExtractedAnswer::None
                }
            },
            QuestionCategory::EntitySeeking => {
                let span = match self.reader.read_span(question, answer) {
                    Ok(span) => span,
                    Err(e) => {
                        warn!(error = %e, "Answer span extraction failed");
                        return ExtractedAnswer::None;
                    }
                };
                debug!(span = %span, "Extracted answer span");

                match fuzzy_match(&span, linked, self.threshold) {
                    Some(entity) => ExtractedAnswer::Entity(entity.clone()),
                    None => ExtractedAnswer::None,
                }
            }
        }
    }
}

/// Linked entity whose key or label best matches `span`, if the best
/// similarity is strictly above `threshold`.
pub fn fuzzy_match<'a>(
    span: &str,
    linked: &'a LinkedEntities,
    threshold: f32,
) -> Option<&'a LinkedEntity> {
    if span.trim().is_empty() {
        return None;
    }

    let mut best: Option<(&LinkedEntity, f32)> = None;
    for (key, entity) in linked {
        let similarity =
            fuzzy::ratio_ignore_case(span, key).max(fuzzy::ratio_ignore_case(span, &entity.label));

        if similarity > threshold && best.is_none_or(|(_, score)| similarity > score) {
            best = Some((entity, similarity));
        }
    }

    if let Some((entity, score)) = best {
        debug!(span, mention = %entity.mention, score, "Fuzzy-matched answer span");
    }
    best.map(|(entity, _)| entity)
}
