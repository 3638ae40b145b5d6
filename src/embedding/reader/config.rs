use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

pub const READER_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Longest answer span, in tokens.
pub const READER_MAX_ANSWER_TOKENS: usize = crate::constants::DEFAULT_MAX_ANSWER_TOKENS;

/// Configuration for [`ExtractiveReader`](super::ExtractiveReader).
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Model directory with a `qa_outputs` head. `None` selects the stub reader.
    pub model_path: Option<PathBuf>,
    pub max_seq_len: usize,
    pub max_answer_tokens: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: READER_MAX_SEQ_LEN,
            max_answer_tokens: READER_MAX_ANSWER_TOKENS,
        }
    }
}

impl ReaderConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn from_optional_path(model_path: Option<PathBuf>) -> Self {
        Self {
            model_path,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 || self.max_answer_tokens == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len and max_answer_tokens must be non-zero".to_string(),
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
}
