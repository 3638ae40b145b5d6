use super::*;
use crate::classifier::QuestionCategory;
use crate::extraction::{ExtractedAnswer, YesNo};
use crate::linking::{LinkedEntities, LinkedEntity};
use crate::pipeline::PipelineOutcome;
use crate::verification::Verdict;

fn outcome(extracted: ExtractedAnswer, verdict: Verdict) -> PipelineOutcome {
    let mut linked = LinkedEntities::new();
    for (mention, label) in [("Rome", "Rome"), ("Italy", "Italy")] {
        linked.insert(
            mention.to_string(),
            LinkedEntity {
                mention: mention.to_string(),
                label: label.to_string(),
                kb_id: String::new(),
                description: String::new(),
                url: format!("https://en.wikipedia.org/wiki/{label}"),
                confidence: 0.8,
            },
        );
    }

    PipelineOutcome {
        question: "Is Rome the capital of Italy?".to_string(),
        category: QuestionCategory::YesNo,
        answer: "Yes,\nRome is the capital\nof Italy.".to_string(),
        linked,
        extracted,
        verdict,
    }
}

mod parse_tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let record = QuestionRecord::parse(3, "question_1\tIs Rome the capital of Italy?\r")
            .unwrap()
            .unwrap();
        assert_eq!(record.line, 3);
        assert_eq!(record.id, "question_1");
        assert_eq!(record.question, "Is Rome the capital of Italy?");
    }

    #[test]
    fn test_blank_line_is_skipped() {
        assert_eq!(QuestionRecord::parse(1, "").unwrap(), None);
        assert_eq!(QuestionRecord::parse(1, "  \t ").unwrap(), None);
    }

    #[test]
    fn test_missing_tab_is_malformed() {
        match QuestionRecord::parse(7, "question_2 What is this?") {
            Err(BatchError::MalformedRecord { line, id }) => {
                assert_eq!(line, 7);
                assert_eq!(id, "question_2 What is this?");
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_question_is_malformed() {
        assert!(matches!(
            QuestionRecord::parse(1, "question_3\t   "),
            Err(BatchError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let record = QuestionRecord::parse(1, "q\tWho?\textra").unwrap().unwrap();
        assert_eq!(record.question, "Who?");
    }
}

mod format_tests {
    use super::*;

    #[test]
    fn test_format_yes_no_outcome() {
        let text = format_outcome(
            "question_1",
            &outcome(
                ExtractedAnswer::YesNo(YesNo::Yes),
                Verdict::Correct { confidence: 0.7 },
            ),
            InconclusivePolicy::Incorrect,
        );

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "question_1\tR\"Yes, Rome is the capital of Italy.\"",
                "question_1\tA\"yes\"",
                "question_1\tC\"correct\"",
                "question_1\tE\"Italy\"\t\"https://en.wikipedia.org/wiki/Italy\"",
                "question_1\tE\"Rome\"\t\"https://en.wikipedia.org/wiki/Rome\"",
            ]
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_inconclusive_policy() {
        let inconclusive = outcome(ExtractedAnswer::None, Verdict::Inconclusive);

        let text = format_outcome("q", &inconclusive, InconclusivePolicy::Incorrect);
        assert!(text.contains("q\tC\"incorrect\"\n"));
        assert!(text.contains("q\tA\"\"\n"));

        let text = format_outcome("q", &inconclusive, InconclusivePolicy::Inconclusive);
        assert!(text.contains("q\tC\"inconclusive\"\n"));
    }

    #[test]
    fn test_policy_leaves_decided_verdicts_alone() {
        let verdict = Verdict::Incorrect { confidence: 0.1 };
        assert_eq!(InconclusivePolicy::Inconclusive.label(&verdict), "incorrect");
        assert_eq!(
            InconclusivePolicy::Incorrect.label(&Verdict::Correct { confidence: 0.9 }),
            "correct"
        );
        assert_eq!(InconclusivePolicy::default(), InconclusivePolicy::Incorrect);
    }
}
