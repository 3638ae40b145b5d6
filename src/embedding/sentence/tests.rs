use super::*;
use crate::embedding::cosine_similarity;
use std::path::PathBuf;

mod config_tests {
    use super::*;

    #[test]
    fn test_sentence_config_default_is_stub() {
        let config = SentenceConfig::default();
        assert!(config.is_stub());
        assert_eq!(config.embedding_dim, SENTENCE_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, SENTENCE_MAX_SEQ_LEN);
    }

    #[test]
    fn test_sentence_config_new() {
        let config = SentenceConfig::new("/models/minilm");
        assert_eq!(config.model_path, Some(PathBuf::from("/models/minilm")));
        assert!(!config.is_stub());
    }

    #[test]
    fn test_sentence_config_from_optional_path() {
        assert!(SentenceConfig::from_optional_path(None).is_stub());
        assert!(!SentenceConfig::from_optional_path(Some(PathBuf::from("/m"))).is_stub());
    }

    #[test]
    fn test_sentence_config_validation() {
        assert!(SentenceConfig::stub().validate().is_ok());

        let config = SentenceConfig {
            embedding_dim: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));

        let config = SentenceConfig {
            model_path: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }
}

mod embedder_tests {
    use super::*;

    #[test]
    fn test_load_stub() {
        let embedder = SentenceEmbedder::load(SentenceConfig::stub()).expect("stub loads");
        assert!(embedder.is_stub());
        let debug = format!("{:?}", embedder);
        assert!(debug.contains("Stub"));
    }

    #[test]
    fn test_load_missing_model_dir() {
        let result = SentenceEmbedder::load(SentenceConfig::new("/nonexistent/model/dir"));
        assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
    }

    #[test]
    fn test_load_incomplete_model_dir() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let result = SentenceEmbedder::load(SentenceConfig::new(temp.path()));
        assert!(matches!(result, Err(EmbeddingError::ModelLoadFailed { .. })));
    }

    #[test]
    fn test_stub_embedding_is_normalized() {
        let embedder = SentenceEmbedder::stub();
        let embedding = embedder.embed("Rome is the capital of Italy").unwrap();

        assert_eq!(embedding.len(), SENTENCE_EMBEDDING_DIM);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stub_embedding_is_deterministic() {
        let embedder = SentenceEmbedder::stub();
        let a = embedder.embed("technology company").unwrap();
        let b = embedder.embed("technology company").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_similarity_tracks_shared_vocabulary() {
        let embedder = SentenceEmbedder::stub();
        let context = embedder.embed("Apple is a tech company").unwrap();
        let company = embedder.embed("technology company").unwrap();
        let fruit = embedder.embed("fruit").unwrap();

        let company_score = cosine_similarity(&context, &company);
        let fruit_score = cosine_similarity(&context, &fruit);
        assert!(company_score > fruit_score);
        assert!(company_score > 0.0);
    }

    #[test]
    fn test_stub_empty_text_is_zero_vector() {
        let embedder = SentenceEmbedder::stub();
        let embedding = embedder.embed("").unwrap();
        assert!(embedding.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_embed_batch_matches_single() {
        let embedder = SentenceEmbedder::stub();
        let texts = ["first sentence", "second sentence", "third"];
        let batch = embedder.embed_batch(&texts).unwrap();

        assert_eq!(batch.len(), 3);
        for (text, row) in texts.iter().zip(batch.iter()) {
            assert_eq!(&embedder.embed(text).unwrap(), row);
        }
    }

    #[test]
    fn test_embed_batch_empty() {
        let embedder = SentenceEmbedder::stub();
        assert!(embedder.embed_batch(&[]).unwrap().is_empty());
    }
}
