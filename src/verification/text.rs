//! Sentence splitting, keyword extraction and keyword sentence lookup.

use crate::nlp::{PartOfSpeech, Tagger};

const SENTENCE_TERMINATORS: &[char] = &['.', '?', '!', '。', '！', '？'];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `true` when the boundary right after `chars[end - 1]` sits inside an
/// abbreviation: `x.y.` ("U.S.", "e.g.") or `Xy.` ("Mr.", "Dr.").
fn closes_abbreviation(chars: &[char], end: usize) -> bool {
    let dotted = end >= 4
        && is_word_char(chars[end - 4])
        && chars[end - 3] == '.'
        && is_word_char(chars[end - 2]);

    let titled = end >= 3
        && chars[end - 3].is_ascii_uppercase()
        && chars[end - 2].is_ascii_lowercase()
        && chars[end - 1] == '.';

    dotted || titled
}

/// Splits text into trimmed, non-empty sentences.
///
/// A boundary follows a terminator (`. ? !` and their full-width forms) that
/// is followed by whitespace or the end of text, unless it closes an
/// abbreviation.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for end in 1..=chars.len() {
        let at_boundary = SENTENCE_TERMINATORS.contains(&chars[end - 1])
            && chars.get(end).is_none_or(|c| c.is_whitespace())
            && !closes_abbreviation(&chars, end);

        if at_boundary {
            push_trimmed(&mut sentences, &chars[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &chars[start..]);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, chars: &[char]) {
    let sentence: String = chars.iter().collect();
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Sentences containing `keyword`, case-insensitively.
pub fn find_sentences_with_keyword<'a>(sentences: &'a [String], keyword: &str) -> Vec<&'a str> {
    let keyword = keyword.to_lowercase();
    sentences
        .iter()
        .filter(|sentence| sentence.to_lowercase().contains(&keyword))
        .map(String::as_str)
        .collect()
}

/// Sentences of `text` matching any keyword, deduplicated in first-seen order.
pub fn keyword_sentences(text: &str, keywords: &[String]) -> Vec<String> {
    let sentences = split_sentences(text);
    let mut found: Vec<String> = Vec::new();

    for keyword in keywords {
        for sentence in find_sentences_with_keyword(&sentences, keyword) {
            if !found.iter().any(|s| s == sentence) {
                found.push(sentence.to_string());
            }
        }
    }

    found
}

/// Common nouns outside entity spans, each prefixed by its first adjective
/// modifier when it has one ("largest company", "sky").
pub fn extract_keywords(tagger: &dyn Tagger, question: &str) -> Vec<String> {
    let tagged = tagger.tag(question);

    tagged
        .tokens()
        .iter()
        .enumerate()
        .filter(|(_, token)| token.pos == PartOfSpeech::Noun && !token.in_entity)
        .map(|(index, token)| {
            match tagged
                .children(index)
                .find(|child| child.pos == PartOfSpeech::Adj)
            {
                Some(adjective) => format!("{} {}", adjective.text, token.text),
                None => token.text.clone(),
            }
        })
        .collect()
}
