use std::ops::Range;

/// Coarse part-of-speech tag (universal tag set subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Aux,
    Adj,
    Adv,
    Det,
    Adp,
    Pron,
    Conj,
    Num,
    Punct,
    Other,
}

impl PartOfSpeech {
    /// Returns `true` for tags that carry a verbal predicate.
    pub fn is_verbal(self) -> bool {
        matches!(self, PartOfSpeech::Verb | PartOfSpeech::Aux)
    }

    /// Returns `true` for common and proper nouns.
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

/// One tagged token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Surface text.
    pub text: String,
    /// Coarse POS tag.
    pub pos: PartOfSpeech,
    /// Byte span in the tagged text.
    pub span: Range<usize>,
    /// `true` if the token lies inside a recognized entity span.
    pub in_entity: bool,
    /// Index of the syntactic head, if the token attaches to one.
    pub head: Option<usize>,
}

/// A span of text recognized as naming an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mention {
    /// Surface text, case preserved.
    pub text: String,
    /// Entity type tag (e.g. `PROPER`, `DATE`, `CARDINAL`).
    pub label: String,
    /// Byte span in the source text.
    pub span: Range<usize>,
}

impl Mention {
    pub fn new(text: impl Into<String>, label: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            span,
        }
    }
}

/// Output of a [`Tagger`](super::Tagger) run over one text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaggedText {
    tokens: Vec<Token>,
    entities: Vec<Mention>,
}

impl TaggedText {
    pub fn new(tokens: Vec<Token>, entities: Vec<Mention>) -> Self {
        Self { tokens, entities }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Entity mentions in text order.
    pub fn entities(&self) -> &[Mention] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<Mention> {
        self.entities
    }

    /// Tokens whose head is `index`, in text order.
    pub fn children(&self, index: usize) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(move |token| token.head == Some(index))
    }

    /// Returns `true` if any token is a verb or auxiliary.
    pub fn has_verb(&self) -> bool {
        self.tokens.iter().any(|token| token.pos.is_verbal())
    }
}
