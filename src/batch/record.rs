use std::fmt::Write;

use super::error::BatchError;
use crate::pipeline::PipelineOutcome;
use crate::verification::Verdict;

/// How an `Inconclusive` verdict is written to the `C` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InconclusivePolicy {
    /// Write `incorrect`.
    #[default]
    Incorrect,
    /// Write `inconclusive`.
    Inconclusive,
}

impl InconclusivePolicy {
    /// Output label for `verdict`.
    pub fn label(self, verdict: &Verdict) -> &'static str {
        match (verdict, self) {
            (Verdict::Inconclusive, Self::Incorrect) => "incorrect",
            (verdict, _) => verdict.as_str(),
        }
    }
}

/// One `id<TAB>question` input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// 1-based line number in the input.
    pub line: usize,
    pub id: String,
    pub question: String,
}

impl QuestionRecord {
    /// Parses one input line; blank lines yield `Ok(None)`.
    ///
    /// Fields past the second tab are ignored.
    pub fn parse(line: usize, raw: &str) -> Result<Option<Self>, BatchError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let mut fields = raw.split('\t');
        let id = fields.next().unwrap_or_default().trim();
        let question = fields.next().map(str::trim).unwrap_or_default();

        if id.is_empty() || question.is_empty() {
            return Err(BatchError::MalformedRecord {
                line,
                id: id.to_string(),
            });
        }

        Ok(Some(Self {
            line,
            id: id.to_string(),
            question: question.to_string(),
        }))
    }
}

/// Tagged output lines for one question (`R`, `A`, `C`, then one `E` per
/// linked entity in mention order), each terminated by `\n`.
pub fn format_outcome(id: &str, outcome: &PipelineOutcome, policy: InconclusivePolicy) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{id}\tR\"{}\"", flatten(&outcome.answer));
    let _ = writeln!(out, "{id}\tA\"{}\"", flatten(outcome.extracted.display_text()));
    let _ = writeln!(out, "{id}\tC\"{}\"", policy.label(&outcome.verdict));
    for (mention, entity) in &outcome.linked {
        let _ = writeln!(out, "{id}\tE\"{}\"\t\"{}\"", flatten(mention), entity.url);
    }

    out
}

fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
