use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Max tokens of `question + passage` fed to the judge.
pub const JUDGE_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Classifier label that means "yes" (BoolQ convention: 0 = false, 1 = true).
pub const JUDGE_YES_LABEL: usize = 1;

#[derive(Debug, Clone)]
pub struct JudgeConfig {
    pub model_path: Option<PathBuf>,

    pub max_seq_len: usize,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: JUDGE_MAX_SEQ_LEN,
        }
    }
}

impl JudgeConfig {
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
}
