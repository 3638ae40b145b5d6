use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default stub / output embedding dimension.
pub const SENTENCE_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default max sequence length.
pub const SENTENCE_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
pub struct SentenceConfig {
    /// Model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub model_path: Option<PathBuf>,
    /// Max tokens to consider per text.
    pub max_seq_len: usize,
    /// Dimension of stub embeddings (model output keeps its hidden size).
    pub embedding_dim: usize,
}

impl Default for SentenceConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: SENTENCE_MAX_SEQ_LEN,
            embedding_dim: SENTENCE_EMBEDDING_DIM,
        }
    }
}

impl SentenceConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces lexical hashed embeddings).
    pub fn stub() -> Self {
        Self::default()
    }

    /// Builds a model config when a path is given, a stub config otherwise.
    pub fn from_optional_path(model_path: Option<PathBuf>) -> Self {
        match model_path {
            Some(path) => Self::new(path),
            None => Self::stub(),
        }
    }

    /// Validates dimensions and the model path when one is set.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be non-zero".to_string(),
            });
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path cannot be empty when provided".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `true` if no model path is configured.
    pub fn is_stub(&self) -> bool {
        self.model_path.is_none()
    }
}
