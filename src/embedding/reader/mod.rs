//! Extractive reader: picks the answer span out of a context passage.
//!
//! The model backend scores every `(start, end)` token pair inside the
//! context segment and maps the best pair back through the tokenizer's
//! character offsets. The stub backend returns the first named span of the
//! context that the question does not already mention.

pub mod config;

pub use config::{READER_MAX_ANSWER_TOKENS, READER_MAX_SEQ_LEN, ReaderConfig};

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::{BertEncoder, BertHead};
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{check_model_dir, load_batch_tokenizer};
use crate::extraction::SpanReader;
use crate::nlp::{RuleTagger, Tagger};

/// Sequence id of the context in a `(question, context)` pair encoding.
const CONTEXT_SEQUENCE: usize = 1;

pub struct ExtractiveReader {
    config: ReaderConfig,
    model: Option<(BertEncoder, Tokenizer, Device)>,
    tagger: RuleTagger,
}

impl std::fmt::Debug for ExtractiveReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractiveReader")
            .field("config", &self.config)
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl ExtractiveReader {
    pub fn load(config: ReaderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("Extractive reader running in STUB mode (named spans)");
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
        let encoder = BertEncoder::load(&model_path, &device, BertHead::SpanLogits).map_err(
            |e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load reader model: {}", e),
            },
        )?;
        let tokenizer = load_batch_tokenizer(&model_path, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            model_path = %model_path.display(),
            max_answer_tokens = config.max_answer_tokens,
            "Extractive reader loaded"
        );

        Ok(Self {
            config,
            model: Some((encoder, tokenizer, device)),
            tagger: RuleTagger::new(),
        })
    }

    pub fn stub() -> Self {
        Self {
            config: ReaderConfig::stub(),
            model: None,
            tagger: RuleTagger::new(),
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    fn read_with_model(
        &self,
        question: &str,
        context: &str,
        encoder: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<String, EmbeddingError> {
        let encoding = tokenizer.encode((question, context), true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let (start, end) = encoder
            .span_logits(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: e.to_string(),
            })?;
        let start = start.squeeze(0)?.to_vec1::<f32>()?;
        let end = end.squeeze(0)?.to_vec1::<f32>()?;

        let sequence_ids = encoding.get_sequence_ids();
        let in_context = |i: usize| sequence_ids.get(i).copied().flatten() == Some(CONTEXT_SEQUENCE);

        let mut best: Option<(usize, usize, f32)> = None;
        for i in (0..start.len()).filter(|&i| in_context(i)) {
            let last = (i + self.config.max_answer_tokens).min(end.len());
            for j in i..last {
                if !in_context(j) {
                    break;
                }
                let score = start[i] + end[j];
                if best.is_none_or(|(_, _, s)| score > s) {
                    best = Some((i, j, score));
                }
            }
        }

        let Some((i, j, score)) = best else {
            return Ok(String::new());
        };

        let offsets = encoding.get_offsets();
        let span = context
            .get(offsets[i].0..offsets[j].1)
            .unwrap_or_default()
            .trim()
            .to_string();

        debug!(start = i, end = j, score, span = %span, "Reader selected span");
        Ok(span)
    }

    fn read_stub(&self, question: &str, context: &str) -> String {
        let question_lower = question.to_lowercase();

        let named = self
            .tagger
            .extract_entities(context)
            .into_iter()
            .find(|m| !question_lower.contains(&m.text.to_lowercase()));

        match named {
            Some(mention) => mention.text,
            None => context
                .split([',', '.', ';', ':', '!', '?'])
                .map(str::trim)
                .find(|clause| !clause.is_empty())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl SpanReader for ExtractiveReader {
    fn read_span(&self, question: &str, context: &str) -> Result<String, EmbeddingError> {
        if context.trim().is_empty() {
            return Ok(String::new());
        }

        match &self.model {
            Some((encoder, tokenizer, device)) => {
                self.read_with_model(question, context, encoder, tokenizer, device)
            }
            None => Ok(self.read_stub(question, context)),
        }
    }
}
