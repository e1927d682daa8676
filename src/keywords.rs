// Frequency-based keyword extraction for mind-map branches.
// No vocabulary files or models: a fixed English stop-word list and term counts.

use std::collections::HashMap;
use tracing::trace;

/// Maximum number of keywords returned (one per mind-map branch)
pub const MAX_KEYWORDS: usize = 7;

/// Tokens with this many chars or fewer are never keywords
pub const MIN_WORD_LEN: usize = 3;

/// Common English function words that carry no topical meaning.
/// Kept sorted for binary search.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "even",
    "every", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in",
    "into", "is", "it", "its", "itself", "just", "like", "many", "may", "me", "might", "more",
    "most", "much", "must", "my", "myself", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shall", "she", "should", "since", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "though", "through", "thus", "to", "too", "under", "until", "up", "upon", "very", "was",
    "we", "were", "what", "whatever", "when", "where", "whether", "which", "while", "who",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Join a topic and optional description into the text keywords are drawn from
pub fn compose_text(topic: &str, description: Option<&str>) -> String {
    match description.map(str::trim) {
        Some(desc) if !desc.is_empty() => format!("{}. {}", topic, desc),
        _ => topic.to_string(),
    }
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// Uppercase the first char, leave the rest untouched
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn qualifies(token: &str) -> bool {
    token.chars().count() > MIN_WORD_LEN && !is_stop_word(token)
}

/// Extract up to [`MAX_KEYWORDS`] salient words from `text`.
///
/// Words are lowercased, stripped of punctuation, filtered by length and
/// stop-word membership, then ranked by how often they occur. Equal counts
/// keep the order in which the words first appeared. Each result is
/// title-cased. Input with no qualifying words yields an empty list.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| is_word_char(c) || c.is_whitespace())
        .collect();

    // (word, count) in order of first occurrence
    let mut ranked: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for token in cleaned.split_whitespace().filter(|t| qualifies(t)) {
        let slot = *slots.entry(token).or_insert_with(|| {
            ranked.push((token, 0));
            ranked.len() - 1
        });
        ranked[slot].1 += 1;
    }

    trace!(distinct = ranked.len(), "counted candidate keywords");

    // sort_by is stable: ties stay in first-occurrence order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| title_case(word))
        .collect()
}
