use std::fmt;

/// Outcome of fact verification.
///
/// `confidence` is the averaged evidence similarity that decided the verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Correct { confidence: f32 },
    Incorrect { confidence: f32 },
    Inconclusive,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct { .. } => "correct",
            Self::Incorrect { .. } => "incorrect",
            Self::Inconclusive => "inconclusive",
        }
    }

    pub fn confidence(&self) -> Option<f32> {
        match self {
            Self::Correct { confidence } | Self::Incorrect { confidence } => Some(*confidence),
            Self::Inconclusive => None,
        }
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Self::Inconclusive)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.confidence() {
            Some(confidence) => write!(f, "{} ({:.3})", self.as_str(), confidence),
            None => f.write_str(self.as_str()),
        }
    }
}

/// A keyword-bearing sentence scored against the generated answer.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceSentence {
    pub text: String,
    /// Cosine similarity in `[-1, 1]`.
    pub similarity: f32,
}
