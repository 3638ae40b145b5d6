//! End-to-end pipeline tests over stub models and an in-memory knowledge base.

mod common;

use std::sync::Arc;

use verity::{
    CandidateRecord, ExtractedAnswer, MockKnowledgeBase, QuestionCategory, StaticGenerator,
    Verdict, YesNo,
};

use common::{ROME_URL, canned_generator, europe_kb, stub_pipeline};

#[tokio::test]
async fn test_entity_question_is_verified() {
    let kb = Arc::new(europe_kb());
    let pipeline = stub_pipeline(canned_generator(), kb.clone());

    let outcome = pipeline.run("What is the capital of Italy?").await;

    assert_eq!(outcome.category, QuestionCategory::EntitySeeking);
    assert_eq!(outcome.linked["Rome"].url, ROME_URL);
    assert_eq!(outcome.extracted.display_text(), "Rome");
    match outcome.verdict {
        Verdict::Correct { confidence } => assert!(confidence > 0.0 && confidence <= 1.0),
        other => panic!("expected a correct verdict, got {other:?}"),
    }
    assert!(kb.fetches().contains(&"Rome".to_string()));
}

#[tokio::test]
async fn test_yes_no_question_is_verified() {
    let pipeline = stub_pipeline(canned_generator(), Arc::new(europe_kb()));

    let outcome = pipeline.run("Is Rome the capital of Italy?").await;

    assert_eq!(outcome.category, QuestionCategory::YesNo);
    assert_eq!(outcome.extracted, ExtractedAnswer::YesNo(YesNo::Yes));
    assert!(matches!(outcome.verdict, Verdict::Correct { .. }));
}

#[tokio::test]
async fn test_entities_are_linked_once_per_mention() {
    let kb = Arc::new(europe_kb());
    let pipeline = stub_pipeline(
        StaticGenerator::new().with_fallback("Rome. Rome is in Italy."),
        kb.clone(),
    );

    let outcome = pipeline.run("Where is Rome?").await;

    let mut searches = kb.searches();
    searches.sort();
    searches.dedup();
    assert_eq!(searches.len(), kb.searches().len());
    assert!(outcome.linked.contains_key("Rome"));
    assert!(outcome.linked.contains_key("Italy"));
}

#[tokio::test]
async fn test_answer_without_entities_is_inconclusive() {
    let pipeline = stub_pipeline(canned_generator(), Arc::new(europe_kb()));

    let outcome = pipeline.run("Who painted the Mona Lisa?").await;

    assert_eq!(outcome.answer, "Nobody knows for sure.");
    assert_eq!(outcome.verdict, Verdict::Inconclusive);
}

#[tokio::test]
async fn test_knowledge_base_outage_degrades_to_inconclusive() {
    let kb = Arc::new(
        MockKnowledgeBase::new()
            .with_failing_search("Rome")
            .with_failing_search("Italy"),
    );
    let pipeline = stub_pipeline(canned_generator(), kb.clone());

    let outcome = pipeline.run("What is the capital of Italy?").await;

    assert!(outcome.linked.is_empty());
    assert!(outcome.extracted.is_none());
    assert_eq!(outcome.verdict, Verdict::Inconclusive);
    assert!(kb.fetches().is_empty());
}

#[tokio::test]
async fn test_missing_page_is_inconclusive() {
    let kb = Arc::new(
        MockKnowledgeBase::new().with_candidates(
            "Rome",
            vec![CandidateRecord::new(
                "Rome",
                "Q220",
                "capital city of Italy",
                ROME_URL,
            )],
        ),
    );
    let pipeline = stub_pipeline(
        StaticGenerator::new().with_fallback("Rome is the answer."),
        kb,
    );

    let outcome = pipeline.run("What is the capital of Italy?").await;

    assert_eq!(outcome.extracted.display_text(), "Rome");
    assert_eq!(outcome.verdict, Verdict::Inconclusive);
}

#[tokio::test]
async fn test_runs_are_repeatable() {
    let pipeline = stub_pipeline(canned_generator(), Arc::new(europe_kb()));

    let first = pipeline.run("What is the capital of Italy?").await;
    let second = pipeline.run("What is the capital of Italy?").await;

    assert_eq!(first, second);
}
