//! Lexicon + suffix heuristic tagger.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::Tagger;
use super::types::{Mention, PartOfSpeech, TaggedText, Token};

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*|\S").expect("valid token pattern")
});

pub(crate) const AUX_VERBS: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has",
    "had", "can", "could", "shall", "should", "will", "would", "may", "might", "must", "isn't",
    "aren't", "wasn't", "weren't", "haven't", "hasn't", "hadn't", "can't", "couldn't", "shan't",
    "shouldn't", "won't", "wouldn't", "mayn't", "mightn't", "mustn't", "don't", "doesn't",
    "didn't", "isnt", "arent", "wasnt", "werent", "havent", "hasnt", "hadnt", "cant", "couldnt",
    "shant", "shouldnt", "wont", "wouldnt", "maynt", "mightnt", "mustnt", "dont", "doesnt",
    "didnt",
];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "all", "both", "either", "neither", "its", "his", "her", "their", "our", "my", "your",
    "another", "such",
];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "them", "us", "what", "who",
    "whom", "whose", "which", "where", "when", "why", "how", "myself", "yourself", "himself",
    "herself", "itself", "ourselves", "themselves", "there", "something", "anything",
    "nothing", "everything", "someone", "anyone", "everyone",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "over", "under",
    "about", "after", "before", "between", "through", "during", "without", "within", "against",
    "among", "as", "than", "since", "until", "per", "via", "across", "behind", "near",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "although", "though",
    "whether", "unless",
];

const ADVERBS: &[&str] = &[
    "not", "never", "very", "also", "too", "often", "always", "only", "just", "still",
    "already", "really", "most", "more", "least", "less", "n't", "ever", "yes", "here", "now",
    "then", "again", "almost", "quite", "rather",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "twenty", "hundred", "thousand", "million", "billion",
];

const ADJECTIVES: &[&str] = &[
    "big", "large", "small", "great", "good", "bad", "new", "old", "high", "low", "long",
    "short", "tall", "young", "true", "false", "rich", "poor", "hot", "cold", "early", "late",
    "first", "last", "best", "worst", "main", "major", "minor", "many", "much", "few", "blue",
    "red", "green", "yellow", "black", "white", "brown", "grey", "gray", "orange", "purple",
    "pink", "round", "flat", "deep", "wide", "heavy", "light", "fast", "slow", "free", "real",
    "full", "empty", "same", "different", "possible", "official", "national", "royal",
    "ancient", "modern", "famous", "popular", "beautiful", "wrong", "right", "sure",
];

const VERBS: &[&str] = &[
    "born", "died", "wrote", "written", "made", "make", "makes", "founded", "located",
    "invented", "discovered", "won", "became", "become", "becomes", "live", "lives", "know",
    "knows", "think", "thinks", "say", "says", "said", "go", "goes", "went", "come", "comes",
    "came", "get", "gets", "got", "run", "runs", "ran", "like", "likes", "mean", "means",
    "fly", "flies", "pass", "happen", "happens", "trust", "help", "call", "called", "built",
    "lead", "led", "directed", "painted", "composed", "created", "produced", "released",
    "wondering", "play", "plays", "played", "take", "takes", "took", "give", "gives", "gave",
];

/// Words that take `-est` without being superlatives.
const NON_SUPERLATIVE_EST: &[&str] = &[
    "forest", "interest", "contest", "request", "test", "west", "rest", "nest", "guest",
    "chest", "quest", "protest", "harvest", "conquest", "arrest", "digest", "honest",
];

/// Punctuation that closes a clause for finite-verb detection.
const CLAUSE_BREAKS: &[&str] = &[".", "?", "!", ";", ":", ","];

/// Connectors allowed inside a proper-noun run ("Republic of Italy").
const ENTITY_CONNECTORS: &[&str] = &["of", "de", "da", "von", "van", "del", "la"];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less", "ish"];

/// Rule-based tagger (no model files).
///
/// POS tags come from closed-class lexicons, capitalization and suffixes;
/// entities are maximal proper-noun runs plus years and numerals; adjectives
/// attach to the noun phrase they precede.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    fn tokenize(text: &str) -> Vec<(Range<usize>, &str)> {
        let mut raw = Vec::new();
        for m in TOKEN_PATTERN.find_iter(text) {
            let word = m.as_str();
            let lower = word.to_lowercase();
            // Split possessive clitics off so "Italy's" yields the entity "Italy".
            if word.chars().count() > 2 && (lower.ends_with("'s") || lower.ends_with("’s")) {
                let clitic_len = if lower.ends_with("’s") { "’s".len() } else { 2 };
                let split = m.end() - clitic_len;
                raw.push((m.start()..split, &text[m.start()..split]));
                raw.push((split..m.end(), &text[split..m.end()]));
            } else {
                raw.push((m.range(), word));
            }
        }
        raw
    }

    fn lexical_pos(word: &str, index: usize) -> PartOfSpeech {
        let lower = word.to_lowercase();
        let lower = lower.as_str();

        if !word.chars().any(char::is_alphanumeric) {
            return PartOfSpeech::Punct;
        }
        if lower == "'s" || lower == "’s" {
            return PartOfSpeech::Other;
        }
        if word
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
        {
            return PartOfSpeech::Num;
        }
        if AUX_VERBS.contains(&lower) {
            return PartOfSpeech::Aux;
        }
        if DETERMINERS.contains(&lower) {
            return PartOfSpeech::Det;
        }
        if PRONOUNS.contains(&lower) {
            return PartOfSpeech::Pron;
        }
        if ADPOSITIONS.contains(&lower) {
            return PartOfSpeech::Adp;
        }
        if CONJUNCTIONS.contains(&lower) {
            return PartOfSpeech::Conj;
        }
        if ADVERBS.contains(&lower) {
            return PartOfSpeech::Adv;
        }
        if NUMBER_WORDS.contains(&lower) {
            return PartOfSpeech::Num;
        }

        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        let known_lowercase = VERBS.contains(&lower) || ADJECTIVES.contains(&lower);
        if capitalized && !(index == 0 && known_lowercase) {
            return PartOfSpeech::ProperNoun;
        }

        if VERBS.contains(&lower) {
            return PartOfSpeech::Verb;
        }
        if ADJECTIVES.contains(&lower) || Self::looks_adjectival(lower) {
            return PartOfSpeech::Adj;
        }
        if lower.len() > 4 && lower.ends_with("ly") {
            return PartOfSpeech::Adv;
        }
        if lower.len() > 4 && (lower.ends_with("ed") || lower.ends_with("ing")) {
            return PartOfSpeech::Verb;
        }

        PartOfSpeech::Noun
    }

    fn looks_adjectival(lower: &str) -> bool {
        if lower.len() > 5 && lower.ends_with("est") && !NON_SUPERLATIVE_EST.contains(&lower) {
            return true;
        }
        lower.len() > 5
            && ADJECTIVE_SUFFIXES
                .iter()
                .any(|suffix| lower.ends_with(suffix))
    }

    /// Nouns directly after a personal subject pronoun are predicates ("you like coffee").
    fn apply_context(tokens: &mut [Token]) {
        for i in 1..tokens.len() {
            let prev_lower = tokens[i - 1].text.to_lowercase();
            if tokens[i].pos == PartOfSpeech::Noun
                && tokens[i - 1].pos == PartOfSpeech::Pron
                && SUBJECT_PRONOUNS.contains(&prev_lower.as_str())
            {
                tokens[i].pos = PartOfSpeech::Verb;
            }
        }
    }

    /// Promotes the first `-s` noun of a verbless clause to a verb when it
    /// sits between a subject and an object or complement ("Apple sells phones").
    fn apply_finite_verbs(tokens: &mut [Token]) {
        let mut clause_has_verb = false;

        for i in 0..tokens.len() {
            let pos = tokens[i].pos;
            if pos == PartOfSpeech::Conj
                || (pos == PartOfSpeech::Punct && CLAUSE_BREAKS.contains(&tokens[i].text.as_str()))
            {
                clause_has_verb = false;
                continue;
            }
            if pos.is_verbal() {
                clause_has_verb = true;
                continue;
            }
            if clause_has_verb || i == 0 || !Self::looks_third_person(&tokens[i]) {
                continue;
            }

            let after_subject = matches!(tokens[i - 1].pos, PartOfSpeech::Pron)
                || tokens[i - 1].pos.is_nominal();
            let before_object = tokens.get(i + 1).is_some_and(|next| {
                next.pos.is_nominal()
                    || matches!(
                        next.pos,
                        PartOfSpeech::Det | PartOfSpeech::Adp | PartOfSpeech::Num | PartOfSpeech::Adj
                    )
            });

            if after_subject && before_object {
                tokens[i].pos = PartOfSpeech::Verb;
                clause_has_verb = true;
            }
        }
    }

    fn looks_third_person(token: &Token) -> bool {
        if token.pos != PartOfSpeech::Noun {
            return false;
        }
        let lower = token.text.to_lowercase();
        lower.len() > 3
            && lower.ends_with('s')
            && !lower.ends_with("ss")
            && !lower.ends_with("us")
            && !lower.ends_with("is")
            && lower.chars().all(char::is_alphabetic)
    }

    fn is_initial(token: &Token) -> bool {
        token.pos == PartOfSpeech::ProperNoun && token.text.chars().count() == 1
    }

    fn recognize_entities(text: &str, tokens: &mut [Token]) -> Vec<Mention> {
        let mut mentions = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            match tokens[i].pos {
                PartOfSpeech::ProperNoun => {
                    let start = i;
                    let mut end = i;
                    let mut j = i + 1;
                    while j < tokens.len() {
                        let token = &tokens[j];
                        if token.pos == PartOfSpeech::ProperNoun {
                            end = j;
                            j += 1;
                        } else if token.text == "."
                            && Self::is_initial(&tokens[j - 1])
                            && tokens.get(j + 1).is_some_and(Self::is_initial)
                        {
                            j += 1;
                        } else if ENTITY_CONNECTORS.contains(&token.text.as_str())
                            && tokens
                                .get(j + 1)
                                .is_some_and(|next| next.pos == PartOfSpeech::ProperNoun)
                        {
                            j += 1;
                        } else {
                            break;
                        }
                    }
                    // Close dotted initialisms ("U.S.").
                    if Self::is_initial(&tokens[end])
                        && end > start
                        && tokens.get(end + 1).is_some_and(|t| t.text == ".")
                    {
                        end += 1;
                    }

                    let span = tokens[start].span.start..tokens[end].span.end;
                    for token in &mut tokens[start..=end] {
                        token.in_entity = true;
                    }
                    mentions.push(Mention::new(&text[span.clone()], "PROPER", span));
                    i = end + 1;
                }
                PartOfSpeech::Num if tokens[i].text.chars().all(|c| c.is_ascii_digit()) => {
                    let label = match tokens[i].text.parse::<u32>() {
                        Ok(year) if tokens[i].text.len() == 4 && (1000..=2100).contains(&year) => {
                            "DATE"
                        }
                        _ => "CARDINAL",
                    };
                    tokens[i].in_entity = true;
                    let span = tokens[i].span.clone();
                    mentions.push(Mention::new(&text[span.clone()], label, span));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        mentions
    }

    fn attach_heads(tokens: &mut [Token]) {
        for i in 0..tokens.len() {
            let pos = tokens[i].pos;
            if pos != PartOfSpeech::Adj && pos != PartOfSpeech::Noun {
                continue;
            }

            let mut j = i + 1;
            if pos == PartOfSpeech::Adj {
                while j < tokens.len()
                    && (matches!(tokens[j].pos, PartOfSpeech::Adj | PartOfSpeech::Adv)
                        || tokens[j].text == ",")
                {
                    j += 1;
                }
            }

            let mut head = None;
            while j < tokens.len() && tokens[j].pos.is_nominal() {
                head = Some(j);
                j += 1;
            }
            tokens[i].head = head;
        }
    }
}

impl Tagger for RuleTagger {
    fn tag(&self, text: &str) -> TaggedText {
        let mut tokens: Vec<Token> = Self::tokenize(text)
            .into_iter()
            .enumerate()
            .map(|(index, (span, word))| Token {
                text: word.to_string(),
                pos: Self::lexical_pos(word, index),
                span,
                in_entity: false,
                head: None,
            })
            .collect();

        Self::apply_context(&mut tokens);
        Self::apply_finite_verbs(&mut tokens);
        let entities = Self::recognize_entities(text, &mut tokens);
        Self::attach_heads(&mut tokens);

        trace!(
            token_count = tokens.len(),
            entity_count = entities.len(),
            "Tagged text"
        );

        TaggedText::new(tokens, entities)
    }
}
