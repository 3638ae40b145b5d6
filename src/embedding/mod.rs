//! Embedding + model utilities.
//!
//! - [`sentence`] provides sentence embeddings behind the [`Embedder`] trait.
//! - [`judge`] provides the yes/no judgment model used for yes/no questions.
//! - [`reader`] provides extractive answer-span reading.
//!
//! All three share one [`bert::BertEncoder`] implementation and fall back to
//! deterministic stub behavior when no model directory is configured.

/// BERT encoder with pooling / classifier / span heads.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Yes/no judgment model.
pub mod judge;
/// Extractive question-answering reader.
pub mod reader;
/// Sentence embedder.
pub mod sentence;
/// Tokenizer/model loading helpers.
pub mod utils;

#[cfg(test)]
mod tests;

pub use error::EmbeddingError;
pub use judge::{BoolQJudge, JudgeConfig};
pub use reader::{ExtractiveReader, ReaderConfig};
pub use sentence::{SentenceConfig, SentenceEmbedder};

/// Text → dense vector collaborator.
///
/// Implementations must be deterministic for a fixed model so ranking and
/// verification are repeatable.
pub trait Embedder: Send + Sync {
    /// Embeds one text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds many texts in one call (one model invocation where supported).
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

/// Cosine similarity in `[-1, 1]`; `0.0` for empty, mismatched or zero vectors.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}
