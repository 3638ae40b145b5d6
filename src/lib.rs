//! Verity library crate (used by the batch binary and integration tests).
//!
//! Verifies generated answers to open-domain questions in four stages:
//!
//! 1. [`QuestionClassifier`] decides whether a question expects yes/no or an entity.
//! 2. [`EntityLinker`] links mentions in the question/answer to knowledge-base records.
//! 3. [`AnswerExtractor`] pulls the yes/no value or linked entity out of the answer.
//! 4. [`FactVerifier`] scores page evidence against the answer and returns a [`Verdict`].
//!
//! [`Pipeline`] sequences the stages per question and [`run_batch`] drives
//! it over an input file.
//!
//! ## Collaborators
//! External concerns sit behind traits so tests can swap them:
//! - [`Tagger`] - POS tags and entity spans ([`RuleTagger`])
//! - [`Embedder`] - sentence embeddings ([`SentenceEmbedder`])
//! - [`YesNoJudge`], [`SpanReader`] - answer models ([`BoolQJudge`], [`ExtractiveReader`])
//! - [`KnowledgeBase`] - candidate search and page text ([`WikipediaClient`], [`WikidataClient`])
//! - [`AnswerGenerator`] - the LLM ([`ChatGenerator`])
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod batch;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod extraction;
pub mod kb;
pub mod linking;
pub mod llm;
pub mod nlp;
pub mod pipeline;
pub mod verification;

pub use batch::{BatchError, BatchSummary, InconclusivePolicy, QuestionRecord, run_batch};
pub use classifier::{QuestionCategory, QuestionClassifier};
pub use config::{Config, ConfigError};
pub use embedding::{
    BoolQJudge, Embedder, EmbeddingError, ExtractiveReader, JudgeConfig, ReaderConfig,
    SentenceConfig, SentenceEmbedder, cosine_similarity,
};
pub use extraction::{AnswerExtractor, ExtractedAnswer, SpanReader, YesNo, YesNoJudge};
pub use kb::{
    CandidateRecord, KbError, KbSource, KnowledgeBase, RateLimiter, WikidataClient,
    WikipediaClient,
};
#[cfg(any(test, feature = "mock"))]
pub use kb::MockKnowledgeBase;
pub use linking::{EntityLinker, LinkedEntities, LinkedEntity};
pub use llm::{AnswerGenerator, ChatGenerator, GenerationError};
#[cfg(any(test, feature = "mock"))]
pub use llm::StaticGenerator;
pub use nlp::{Mention, RuleTagger, Tagger};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use verification::{EvidenceSentence, FactVerifier, VerificationError, Verdict};
