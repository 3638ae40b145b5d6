//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use verity::embedding::{BoolQJudge, ExtractiveReader, SentenceEmbedder};
use verity::{
    AnswerExtractor, CandidateRecord, EntityLinker, FactVerifier, MockKnowledgeBase, Pipeline,
    RuleTagger, StaticGenerator, Tagger,
};

pub const ROME_URL: &str = "https://en.wikipedia.org/wiki/Rome";
pub const ITALY_URL: &str = "https://en.wikipedia.org/wiki/Italy";
pub const PARIS_URL: &str = "https://en.wikipedia.org/wiki/Paris";

pub const ROME_PAGE: &str = "Rome is the capital city of Italy. \
    It is famous for its fountains. Rome has been inhabited for millennia.";
pub const ITALY_PAGE: &str = "Italy is a country in southern Europe. Its capital is Rome.";
pub const PARIS_PAGE: &str = "Paris is the capital of France. The Seine flows through Paris.";

/// Knowledge base with Rome, Italy, France and Paris records.
pub fn europe_kb() -> MockKnowledgeBase {
    MockKnowledgeBase::new()
        .with_candidates(
            "Rome",
            vec![
                CandidateRecord::new("Rome, Georgia", "Q1", "city in Georgia", "u/georgia"),
                CandidateRecord::new("Rome", "Q220", "capital city of Italy", ROME_URL),
            ],
        )
        .with_candidates(
            "Italy",
            vec![CandidateRecord::new(
                "Italy",
                "Q38",
                "country in southern Europe",
                ITALY_URL,
            )],
        )
        .with_candidates(
            "Paris",
            vec![CandidateRecord::new(
                "Paris",
                "Q90",
                "capital city of France",
                PARIS_URL,
            )],
        )
        .with_page("Rome", ROME_PAGE)
        .with_page("Italy", ITALY_PAGE)
        .with_page("Paris", PARIS_PAGE)
}

/// Pipeline over stub models, the given generator and knowledge base.
pub fn stub_pipeline(generator: StaticGenerator, kb: Arc<MockKnowledgeBase>) -> Pipeline {
    let tagger: Arc<dyn Tagger> = Arc::new(RuleTagger::new());
    let embedder = Arc::new(SentenceEmbedder::stub());

    Pipeline::new(
        Arc::new(generator),
        Arc::clone(&tagger),
        EntityLinker::new(kb.clone(), embedder.clone()),
        AnswerExtractor::new(
            Arc::new(BoolQJudge::stub()),
            Arc::new(ExtractiveReader::stub()),
        ),
        FactVerifier::new(kb, embedder, tagger),
    )
}

/// Generator answering the questions used across the integration suites.
pub fn canned_generator() -> StaticGenerator {
    StaticGenerator::new()
        .with_answer(
            "What is the capital of Italy?",
            "Rome is the capital of Italy.",
        )
        .with_answer(
            "Is Rome the capital of Italy?",
            "Yes, Rome is the capital of Italy.",
        )
        .with_answer("Who painted the Mona Lisa?", "Nobody knows for sure.")
}
