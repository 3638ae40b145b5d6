//! Orchestrates one verification run per question:
//! classify → generate → link → extract → verify.
//!
//! Stage failures never escape [`Pipeline::run`]; they degrade to an empty
//! answer, no extraction or an [`Verdict::Inconclusive`] verdict.


use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::classifier::{QuestionCategory, QuestionClassifier};
use crate::config::Config;
use crate::embedding::{
    BoolQJudge, EmbeddingError, ExtractiveReader, JudgeConfig, ReaderConfig, SentenceConfig,
    SentenceEmbedder,
};
use crate::extraction::{AnswerExtractor, ExtractedAnswer};
use crate::kb::{self, RateLimiter};
use crate::linking::{EntityLinker, LinkedEntities};
use crate::llm::{AnswerGenerator, ChatGenerator};
use crate::nlp::{RuleTagger, Tagger};
use crate::verification::{FactVerifier, Verdict};

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub question: String,
    pub category: QuestionCategory,
    /// Generated answer; empty when generation failed.
    pub answer: String,
    pub linked: LinkedEntities,
    pub extracted: ExtractedAnswer,
    pub verdict: Verdict,
}

/// The four verification stages plus answer generation.
pub struct Pipeline {
    generator: Arc<dyn AnswerGenerator>,
    tagger: Arc<dyn Tagger>,
    classifier: QuestionClassifier,
    linker: EntityLinker,
    extractor: AnswerExtractor,
    verifier: FactVerifier,
}

impl Pipeline {
    pub fn new(
        generator: Arc<dyn AnswerGenerator>,
        tagger: Arc<dyn Tagger>,
        linker: EntityLinker,
        extractor: AnswerExtractor,
        verifier: FactVerifier,
    ) -> Self {
        Self {
            generator,
            classifier: QuestionClassifier::new(Arc::clone(&tagger)),
            tagger,
            linker,
            extractor,
            verifier,
        }
    }

    /// Loads models and clients described by `config`.
    ///
    /// Model paths left unset select the stub backends.
    pub fn from_config(config: &Config) -> Result<Self, EmbeddingError> {
        let tagger: Arc<dyn Tagger> = Arc::new(RuleTagger::new());
        let embedder = Arc::new(SentenceEmbedder::load(SentenceConfig::from_optional_path(
            config.embedding_model_path.clone(),
        ))?);
        let judge = Arc::new(BoolQJudge::load(JudgeConfig::from_optional_path(
            config.judge_model_path.clone(),
        ))?);
        let reader = Arc::new(ExtractiveReader::load(ReaderConfig::from_optional_path(
            config.reader_model_path.clone(),
        ))?);

        let limiter = Arc::new(RateLimiter::new(config.rate_limit_interval));
        let kb = kb::client_for(config.kb_source, limiter);

        info!(
            kb_source = %config.kb_source,
            llm_model = %config.llm_model,
            rate_limit = ?config.rate_limit_interval,
            "Pipeline components ready"
        );

        Ok(Self::new(
            Arc::new(ChatGenerator::new(config.llm_model.clone())),
            Arc::clone(&tagger),
            EntityLinker::new(Arc::clone(&kb), embedder.clone()),
            AnswerExtractor::new(judge, reader).with_threshold(config.match_threshold),
            FactVerifier::new(kb, embedder, tagger)
                .with_threshold(config.verify_threshold)
                .with_top_k(config.evidence_top_k),
        ))
    }

    /// Runs every stage for one question.
    #[instrument(skip(self, question), fields(question = %question))]
    pub async fn run(&self, question: &str) -> PipelineOutcome {
        let question = question.trim();
        let category = self.classifier.classify(question);
        debug!(%category, "Classified question");

        let answer = match self.generator.generate_answer(question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Answer generation failed");
                return PipelineOutcome {
                    question: question.to_string(),
                    category,
                    answer: String::new(),
                    linked: LinkedEntities::new(),
                    extracted: ExtractedAnswer::None,
                    verdict: Verdict::Inconclusive,
                };
            }
        };

        let mentions = self.tagger.extract_entities(&format!("{question}. {answer}"));
        let linked = self.linker.link(&mentions, &answer).await;
        debug!(mentions = mentions.len(), linked = linked.len(), "Linked entities");

        let extracted = self
            .extractor
            .extract(category, question, &answer, &linked);
        debug!(extracted = %extracted.display_text(), "Extracted answer");

        let verdict = self
            .verifier
            .verify(question, &extracted, &linked, &answer)
            .await;

        PipelineOutcome {
            question: question.to_string(),
            category,
            answer,
            linked,
            extracted,
            verdict,
        }
    }
}
