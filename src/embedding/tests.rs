use super::*;
use crate::extraction::{SpanReader, YesNo, YesNoJudge};

mod cosine_tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let a = vec![0.3, 0.4, 0.5];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_opposite() {
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_cosine_ignores_magnitude() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.0, 4.0, 6.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }
}

mod judge_tests {
    use super::*;

    #[test]
    fn test_judge_config_validation() {
        assert!(JudgeConfig::stub().validate().is_ok());
        let config = JudgeConfig {
            max_seq_len: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_judge_load_stub() {
        let judge = BoolQJudge::load(JudgeConfig::stub()).unwrap();
        assert!(!judge.is_model_loaded());
    }

    #[test]
    fn test_judge_load_missing_dir() {
        let result = BoolQJudge::load(JudgeConfig::new("/nonexistent/judge"));
        assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
    }

    #[test]
    fn test_stub_judge_affirmative() {
        let judge = BoolQJudge::stub();
        let q = "Is the sky blue?";
        assert_eq!(judge.judge(q, "Yes, the sky is blue.").unwrap(), YesNo::Yes);
        assert_eq!(judge.judge(q, "The sky appears blue.").unwrap(), YesNo::Yes);
    }

    #[test]
    fn test_stub_judge_negative() {
        let judge = BoolQJudge::stub();
        let q = "Is Rome the capital of France?";
        assert_eq!(judge.judge(q, "No.").unwrap(), YesNo::No);
        assert_eq!(
            judge.judge(q, "Rome is not the capital of France.").unwrap(),
            YesNo::No
        );
        assert_eq!(
            judge.judge(q, "That isn't right, Paris is.").unwrap(),
            YesNo::No
        );
    }
}

mod reader_tests {
    use super::*;

    #[test]
    fn test_reader_load_stub() {
        let reader = ExtractiveReader::load(ReaderConfig::stub()).unwrap();
        assert!(!reader.is_model_loaded());
    }

    #[test]
    fn test_reader_config_validation() {
        let config = ReaderConfig {
            max_answer_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stub_reader_prefers_new_named_span() {
        let reader = ExtractiveReader::stub();
        let span = reader
            .read_span(
                "What is the capital of Italy?",
                "Rome is the capital of Italy.",
            )
            .unwrap();
        assert_eq!(span, "Rome");
    }

    #[test]
    fn test_stub_reader_falls_back_to_first_clause() {
        let reader = ExtractiveReader::stub();
        let span = reader
            .read_span("what do cows eat?", "grass, mostly. also hay")
            .unwrap();
        assert_eq!(span, "grass");
    }

    #[test]
    fn test_reader_empty_context() {
        let reader = ExtractiveReader::stub();
        assert_eq!(reader.read_span("Who?", "   ").unwrap(), "");
    }
}
