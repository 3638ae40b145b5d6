//! Sentence embedder (BERT mean pooling + tokenizer).
//!
//! Use [`SentenceConfig::stub`] for tests/examples without model files. The
//! stub hashes content words into buckets, so texts sharing vocabulary score
//! a positive cosine similarity and unrelated texts score zero.

/// Sentence embedder configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceConfig};

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use candle_core::Device;
use tracing::{debug, info, warn};

use crate::embedding::Embedder;
use crate::embedding::bert::{BertEncoder, BertHead, stack_rows};
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{check_model_dir, load_batch_tokenizer};

const STUB_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "of", "in", "on", "at", "to",
    "for", "with", "by", "from", "as", "and", "or", "it", "its", "this", "that", "which",
];

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Sentence embedding generator (supports stub mode).
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: SentenceConfig,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode when no model path is set).
    pub fn load(config: SentenceConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("Sentence embedder running in STUB mode (lexical hashing)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
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
        debug!(?device, "Selected compute device for sentence embedder");

        let encoder = BertEncoder::load(&model_path, &device, BertHead::Pooling).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;
        let tokenizer = load_batch_tokenizer(&model_path, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            model_path = %model_path.display(),
            max_seq_len = config.max_seq_len,
            "Sentence embedder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    /// Convenience constructor for a stub embedder.
    pub fn stub() -> Self {
        Self {
            backend: EmbedderBackend::Stub,
            config: SentenceConfig::stub(),
        }
    }

    fn embed_batch_with_model(
        &self,
        texts: &[&str],
        encoder: &BertEncoder,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let ids: Vec<&[u32]> = encodings.iter().map(|e| e.get_ids()).collect();
        let type_ids: Vec<&[u32]> = encodings.iter().map(|e| e.get_type_ids()).collect();
        let masks: Vec<&[u32]> = encodings.iter().map(|e| e.get_attention_mask()).collect();

        debug!(
            batch_size = texts.len(),
            seq_len = ids.first().map(|row| row.len()).unwrap_or(0),
            "Generating sentence embeddings (forward pass)"
        );

        let input_ids = stack_rows(&ids, device)?;
        let token_type_ids = stack_rows(&type_ids, device)?;
        let attention_mask = stack_rows(&masks, device)?;

        let pooled = encoder
            .mean_pooled(&input_ids, &token_type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let rows = pooled.to_vec2::<f32>()?;
        Ok(rows.into_iter().map(normalize).collect())
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.config.embedding_dim];

        let lower = text.to_lowercase();
        for word in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty() && !STUB_STOP_WORDS.contains(w))
        {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let bucket = (hasher.finish() % self.config.embedding_dim as u64) as usize;
            embedding[bucket] += 1.0;
        }

        normalize(embedding)
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &SentenceConfig {
        &self.config
    }
}

impl Embedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut rows = self.embed_batch(&[text])?;
        rows.pop().ok_or_else(|| EmbeddingError::InferenceFailed {
            reason: "encoder returned no rows".to_string(),
        })
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_batch_with_model(texts, encoder, tokenizer, device),
            EmbedderBackend::Stub => Ok(texts.iter().map(|text| self.embed_stub(text)).collect()),
        }
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
