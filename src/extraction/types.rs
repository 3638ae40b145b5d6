use std::fmt;

use crate::embedding::EmbeddingError;
use crate::linking::LinkedEntity;

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Lowercase form written to batch output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the generated answer commits to.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedAnswer {
    YesNo(YesNo),
    Entity(LinkedEntity),
    /// Nothing could be extracted with confidence.
    None,
}

impl ExtractedAnswer {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Text for the batch `A` line: `yes`/`no`, the linked label, or empty.
    pub fn display_text(&self) -> &str {
        match self {
            Self::YesNo(answer) => answer.as_str(),
            Self::Entity(entity) => &entity.label,
            Self::None => "",
        }
    }
}

/// Judges whether a generated answer says yes or no to a question.
pub trait YesNoJudge: Send + Sync {
    fn judge(&self, question: &str, answer: &str) -> Result<YesNo, EmbeddingError>;
}

/// Extracts the literal answer span for a question from a context passage.
pub trait SpanReader: Send + Sync {
    /// Returns the span text (empty when nothing is found).
    fn read_span(&self, question: &str, context: &str) -> Result<String, EmbeddingError>;
}
