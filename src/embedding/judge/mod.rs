//! Yes/no judgment over `(question, generated answer)`.
//!
//! The model backend is a BERT sequence classifier fine-tuned on BoolQ-style
//! data over `question [SEP] answer` (two labels, label 1 = yes). Without a
//! model directory the judge reads negation cues off the generated answer.

pub mod config;

pub use config::{JUDGE_MAX_SEQ_LEN, JUDGE_YES_LABEL, JudgeConfig};

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::{BertEncoder, BertHead};
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{check_model_dir, load_batch_tokenizer};
use crate::extraction::{YesNo, YesNoJudge};

const NEGATION_CUES: &[&str] = &[
    "no", "not", "never", "false", "incorrect", "nope", "isn't", "aren't", "wasn't", "weren't",
    "doesn't", "don't", "didn't", "cannot", "can't", "won't", "neither", "nor",
];

pub struct BoolQJudge {
    config: JudgeConfig,
    model: Option<(BertEncoder, Tokenizer, Device)>,
}

impl std::fmt::Debug for BoolQJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoolQJudge")
            .field("config", &self.config)
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl BoolQJudge {
    pub fn load(config: JudgeConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("Yes/no judge running in STUB mode (negation cues)");
            return Ok(Self::stub());
        };

        check_model_dir(&model_path).map_err(|reason| {
            if model_path.exists() {
                EmbeddingError::ModelLoadFailed { reason }
            } else {
                EmbeddingError::ModelNotFound {
                    path: model_path.clone(),
                }
            }
        })?;

        let device = select_device()?;
        let encoder = BertEncoder::load(
            &model_path,
            &device,
            BertHead::Classifier { num_labels: 2 },
        )
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to load judge model: {}", e),
        })?;
        let tokenizer = load_batch_tokenizer(&model_path, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(model_path = %model_path.display(), "Yes/no judge loaded");

        Ok(Self {
            config,
            model: Some((encoder, tokenizer, device)),
        })
    }

    pub fn stub() -> Self {
        Self {
            config: JudgeConfig::stub(),
            model: None,
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    fn judge_with_model(
        question: &str,
        passage: &str,
        encoder: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<YesNo, EmbeddingError> {
        let text = format!("{question} [SEP] {passage}");
        let encoding = tokenizer.encode(text, true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let logits = encoder
            .classify(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: e.to_string(),
            })?;
        let probs = candle_nn::ops::softmax(&logits, 1)?.squeeze(0)?.to_vec1::<f32>()?;

        let (label, confidence) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "judge produced no logits".to_string(),
            })?;

        debug!(label, confidence, "Yes/no judgment");

        Ok(if label == JUDGE_YES_LABEL {
            YesNo::Yes
        } else {
            YesNo::No
        })
    }

    fn judge_stub(passage: &str) -> YesNo {
        let lower = passage.to_lowercase();
        let mut words = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty());

        match words.next() {
            Some("yes") => return YesNo::Yes,
            Some("no") => return YesNo::No,
            _ => {}
        }

        if lower
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .any(|w| NEGATION_CUES.contains(&w))
        {
            YesNo::No
        } else {
            YesNo::Yes
        }
    }
}

impl YesNoJudge for BoolQJudge {
    fn judge(&self, question: &str, answer: &str) -> Result<YesNo, EmbeddingError> {
        match &self.model {
            Some((encoder, tokenizer, device)) => {
                Self::judge_with_model(question, answer, encoder, tokenizer, device)
            }
            None => {
                let verdict = Self::judge_stub(answer);
                debug!(?verdict, "Yes/no judgment (stub)");
                Ok(verdict)
            }
        }
    }
}
