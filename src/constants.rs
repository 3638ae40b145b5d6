//! Cross-cutting, shared constants.
//!
//! Stage-specific modules re-export the values they own (e.g.
//! [`crate::extraction::DEFAULT_MATCH_THRESHOLD`]); keep the primary
//! definitions here so the config layer and the stages cannot drift.

use std::time::Duration;

/// Output dimension of the default sentence encoder (BERT-base family).
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Max tokens fed to any BERT-family model.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Fuzzy-match ratio an extracted span must exceed to bind to a linked entity.
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.70;

/// Average evidence similarity a claim must exceed to count as supported.
pub const DEFAULT_VERIFY_THRESHOLD: f32 = 0.60;

/// Number of best-scoring evidence sentences averaged into a verdict.
pub const DEFAULT_EVIDENCE_TOP_K: usize = 3;

/// Max knowledge-base candidates requested per mention.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 5;

/// Minimum spacing between consecutive external API calls.
pub const DEFAULT_RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(100);

/// Max completion tokens requested from the answer generator.
pub const DEFAULT_GENERATION_MAX_TOKENS: u32 = 32;

/// Max tokens an extractive reader span may cover.
pub const DEFAULT_MAX_ANSWER_TOKENS: usize = 30;

/// Bound on cached page texts held by a knowledge-base client.
pub const DEFAULT_PAGE_CACHE_CAPACITY: u64 = 1_024;
