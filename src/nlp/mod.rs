//! Tagging collaborators: POS tags, entity spans and adjective attachment.
//!
//! The pipeline only depends on the [`Tagger`] trait. [`RuleTagger`] is a
//! lexicon + suffix heuristic tagger that needs no model files; swap in a
//! statistical tagger by implementing the trait.

pub mod rule;
pub mod types;


pub use rule::RuleTagger;
pub use types::{Mention, PartOfSpeech, TaggedText, Token};

/// Tokenizer + POS tagger + entity recognizer.
pub trait Tagger: Send + Sync {
    /// Tags `text`, returning tokens (with heads) and entity mentions.
    fn tag(&self, text: &str) -> TaggedText;

    /// Extracts entity mentions in text order.
    fn extract_entities(&self, text: &str) -> Vec<Mention> {
        self.tag(text).into_entities()
    }
}
