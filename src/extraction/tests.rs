use super::*;
use crate::embedding::{BoolQJudge, EmbeddingError, ExtractiveReader};

fn entity(mention: &str, label: &str) -> LinkedEntity {
    LinkedEntity {
        mention: mention.to_string(),
        label: label.to_string(),
        kb_id: String::new(),
        description: String::new(),
        url: format!("https://en.wikipedia.org/wiki/{}", label.replace(' ', "_")),
        confidence: 0.5,
    }
}

fn italy_and_rome() -> LinkedEntities {
    let mut linked = LinkedEntities::new();
    linked.insert("Italy".to_string(), entity("Italy", "Italy"));
    linked.insert("Rome".to_string(), entity("Rome", "Rome, Italy"));
    linked
}

fn extractor() -> AnswerExtractor {
    AnswerExtractor::new(
        Arc::new(BoolQJudge::stub()),
        Arc::new(ExtractiveReader::stub()),
    )
}

struct FixedSpan(&'static str);

impl SpanReader for FixedSpan {
    fn read_span(&self, _question: &str, _context: &str) -> Result<String, EmbeddingError> {
        Ok(self.0.to_string())
    }
}

struct Broken;

impl SpanReader for Broken {
    fn read_span(&self, _question: &str, _context: &str) -> Result<String, EmbeddingError> {
        Err(EmbeddingError::InferenceFailed {
            reason: "reader offline".to_string(),
        })
    }
}

impl YesNoJudge for Broken {
    fn judge(&self, _question: &str, _answer: &str) -> Result<YesNo, EmbeddingError> {
        Err(EmbeddingError::InferenceFailed {
            reason: "judge offline".to_string(),
        })
    }
}

mod fuzzy_tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_ratio_identical_and_empty() {
        assert_eq!(fuzzy::ratio("rome", "rome"), 1.0);
        assert_eq!(fuzzy::ratio("", ""), 1.0);
        assert_eq!(fuzzy::ratio("rome", ""), 0.0);
    }

    #[test]
    fn test_ratio_partial_overlap() {
        assert!(close(fuzzy::ratio("rome", "rome, italy"), 8.0 / 15.0));
        assert!(close(fuzzy::ratio("abcd", "bcde"), 0.75));
    }

    #[test]
    fn test_ratio_recurses_on_both_sides() {
        // "ab" then "yz" around the longest block "cdef"
        assert!(close(fuzzy::ratio("abXcdefYyz", "abcdefyz"), 16.0 / 18.0));
    }

    #[test]
    fn test_ratio_is_case_sensitive_unless_asked() {
        assert!(fuzzy::ratio("Rome", "rome") < 1.0);
        assert_eq!(fuzzy::ratio_ignore_case("Rome", "rome"), 1.0);
    }

    #[test]
    fn test_ratio_handles_multibyte_chars() {
        assert_eq!(fuzzy::ratio("Zürich", "Zürich"), 1.0);
        assert!(close(fuzzy::ratio("Zürich", "Zurich"), 10.0 / 12.0));
    }
}

mod fuzzy_match_tests {
    use super::*;

    #[test]
    fn test_exact_key_match_wins() {
        let linked = italy_and_rome();
        let matched = fuzzy_match("Rome", &linked, DEFAULT_MATCH_THRESHOLD).unwrap();
        assert_eq!(matched.mention, "Rome");
        assert_eq!(matched.label, "Rome, Italy");
    }

    #[test]
    fn test_label_similarity_counts() {
        let mut linked = LinkedEntities::new();
        linked.insert("the city".to_string(), entity("the city", "Rome, Italy"));
        let matched = fuzzy_match("rome, italy", &linked, DEFAULT_MATCH_THRESHOLD);
        assert_eq!(matched.map(|e| e.mention.as_str()), Some("the city"));
    }

    #[test]
    fn test_below_threshold_is_none() {
        let linked = italy_and_rome();
        assert!(fuzzy_match("Paris", &linked, DEFAULT_MATCH_THRESHOLD).is_none());
        assert!(fuzzy_match("", &linked, DEFAULT_MATCH_THRESHOLD).is_none());
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut linked = LinkedEntities::new();
        linked.insert("abcd".to_string(), entity("abcd", "abcd"));
        // ratio("abcd", "bcde") == 0.75 exactly
        assert!(fuzzy_match("bcde", &linked, 0.75).is_none());
        assert!(fuzzy_match("bcde", &linked, 0.74).is_some());
    }
}

mod extractor_tests {
    use super::*;

    #[test]
    fn test_yes_no_question_uses_judge() {
        let extracted = extractor().extract(
            QuestionCategory::YesNo,
            "Is the sky blue?",
            "Yes, the sky is blue.",
            &LinkedEntities::new(),
        );
        assert_eq!(extracted, ExtractedAnswer::YesNo(YesNo::Yes));
        assert_eq!(extracted.display_text(), "yes");
    }

    #[test]
    fn test_entity_question_matches_linked_entity() {
        let extracted = extractor().extract(
            QuestionCategory::EntitySeeking,
            "What is the capital of Italy?",
            "Rome is the capital of Italy.",
            &italy_and_rome(),
        );
        match extracted {
            ExtractedAnswer::Entity(entity) => assert_eq!(entity.mention, "Rome"),
            other => panic!("expected entity, got {other:?}"),
        }
    }

    #[test]
    fn test_fixed_span_selects_rome() {
        let extractor = AnswerExtractor::new(Arc::new(BoolQJudge::stub()), Arc::new(FixedSpan("Rome")));
        let extracted = extractor.extract(
            QuestionCategory::EntitySeeking,
            "What is the capital of Italy?",
            "It is Rome.",
            &italy_and_rome(),
        );
        assert_eq!(extracted.display_text(), "Rome, Italy");
    }

    #[test]
    fn test_unmatched_span_is_none() {
        let extractor =
            AnswerExtractor::new(Arc::new(BoolQJudge::stub()), Arc::new(FixedSpan("Milan")));
        let extracted = extractor.extract(
            QuestionCategory::EntitySeeking,
            "What is the capital of Italy?",
            "Milan.",
            &italy_and_rome(),
        );
        assert!(extracted.is_none());
        assert_eq!(extracted.display_text(), "");
    }

    #[test]
    fn test_collaborator_failures_are_none() {
        let extractor = AnswerExtractor::new(Arc::new(Broken), Arc::new(Broken));
        let linked = italy_and_rome();
        assert!(
            extractor
                .extract(QuestionCategory::YesNo, "Is Rome old?", "Yes.", &linked)
                .is_none()
        );
        assert!(
            extractor
                .extract(QuestionCategory::EntitySeeking, "Where?", "Rome.", &linked)
                .is_none()
        );
    }

    #[test]
    fn test_custom_threshold() {
        let extractor = extractor().with_threshold(0.9);
        assert_eq!(extractor.threshold(), 0.9);
    }
}
