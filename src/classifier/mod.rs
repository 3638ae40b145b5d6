//! Question-type classification.
//!
//! An ordered cascade of regex and POS rules over normalized question text.
//! The first matching rule decides; there is no scoring or blending.


use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::trace;

use crate::nlp::Tagger;

const WH_WORDS: &[&str] = &["what", "who", "where", "whom", "whose", "how", "which"];

/// Auxiliaries that can open a yes/no question. Normalization strips
/// apostrophes, so contracted forms appear without them too.
const QUESTION_AUX: &[&str] = &[
    "am", "is", "are", "was", "were", "do", "does", "did", "have", "has", "had", "can", "could",
    "shall", "should", "will", "would", "may", "might", "must", "isn't", "aren't", "wasn't",
    "weren't", "haven't", "hasn't", "hadn't", "can't", "couldn't", "shan't", "shouldn't",
    "won't", "wouldn't", "mayn't", "mightn't", "mustn't", "isnt", "arent", "wasnt", "werent",
    "havent", "hasnt", "hadnt", "cant", "couldnt", "shant", "shouldnt", "wont", "wouldnt",
    "maynt", "mightnt", "mustnt",
];

const LINKING_VERBS: &[&str] = &["is", "are", "was", "were"];

static LABEL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^question:\s*").expect("valid label pattern"));

static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s?.!]").expect("valid noise pattern"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.?!]+").expect("valid sentence pattern"));

static WH_AUX_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(?:{})\s+(?:{})\b.*\?$",
        WH_WORDS.join("|"),
        QUESTION_AUX.join("|")
    ))
    .expect("valid wh-question pattern")
});

static AUX_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(?:{})\b.*\?$", QUESTION_AUX.join("|")))
        .expect("valid aux-question pattern")
});

static WH_OPENING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(?:{})\b", WH_WORDS.join("|"))).expect("valid wh pattern")
});

/// Expected answer shape of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionCategory {
    /// General question or complete declarative statement; answered yes/no.
    YesNo,
    /// WH-question or incomplete statement; answered by an entity or fact.
    EntitySeeking,
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YesNo => f.write_str("yes/no"),
            Self::EntitySeeking => f.write_str("entity-seeking"),
        }
    }
}

/// Which rule of the cascade fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationRule {
    TooShort,
    WhAuxQuestion,
    AuxQuestion,
    IncompleteWh,
    Unterminated,
    DanglingCopula,
    NoVerb,
    Declarative,
}

impl ClassificationRule {
    pub fn category(self) -> QuestionCategory {
        match self {
            Self::AuxQuestion | Self::Declarative => QuestionCategory::YesNo,
            _ => QuestionCategory::EntitySeeking,
        }
    }
}

/// Rule cascade over normalized text; the tagger only backs the verb check.
#[derive(Clone)]
pub struct QuestionClassifier {
    tagger: Arc<dyn Tagger>,
}

impl QuestionClassifier {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self { tagger }
    }

    /// Canonical form of a question.
    ///
    /// Trims and lowercases, drops a leading `question:` label and anything
    /// that is not a word character, whitespace or `. ? !`, then keeps only
    /// clauses longer than two words. The result ends in `?` when the cleaned
    /// input did, otherwise in `.` (unless empty).
    pub fn normalize(question: &str) -> String {
        let lowered = question.trim().to_lowercase();
        let unlabeled = LABEL_PREFIX.replace(&lowered, "");
        let cleaned = NOISE.replace_all(&unlabeled, "");

        let clauses: Vec<String> = SENTENCE_END
            .split(&cleaned)
            .map(|clause| clause.split_whitespace().collect::<Vec<_>>())
            .filter(|words| words.len() > 2)
            .map(|words| words.join(" "))
            .collect();
        let joined = clauses.join(" ");

        if cleaned.ends_with('?') {
            format!("{joined}?")
        } else if joined.is_empty() || joined.ends_with('.') {
            joined
        } else {
            format!("{joined}.")
        }
    }

    /// Classifies a question (normalizing it first).
    pub fn classify(&self, question: &str) -> QuestionCategory {
        let rule = self.matching_rule(question);
        trace!(question, ?rule, "Classified question");
        rule.category()
    }

    /// First rule of the cascade that matches `question`.
    pub fn matching_rule(&self, question: &str) -> ClassificationRule {
        let question = Self::normalize(question);

        if question.split_whitespace().count() <= 1 {
            return ClassificationRule::TooShort;
        }
        if WH_AUX_QUESTION.is_match(&question) {
            return ClassificationRule::WhAuxQuestion;
        }
        if AUX_QUESTION.is_match(&question) {
            return ClassificationRule::AuxQuestion;
        }
        if WH_OPENING.is_match(&question) {
            return ClassificationRule::IncompleteWh;
        }
        if !question.ends_with('.') && !question.ends_with('?') {
            return ClassificationRule::Unterminated;
        }

        let last_word = question
            .trim_end_matches(['.', '?'])
            .split_whitespace()
            .last()
            .unwrap_or_default();
        if LINKING_VERBS.contains(&last_word) || question.contains("...") {
            return ClassificationRule::DanglingCopula;
        }

        if !self.tagger.tag(&question).has_verb() {
            return ClassificationRule::NoVerb;
        }

        ClassificationRule::Declarative
    }
}
