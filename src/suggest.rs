use crate::{stable_hash64, SmartSuggestion, Thread};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "also", "been", "before", "being", "between",
    "both", "could", "does", "doing", "down", "each", "from", "have", "having",
    "here", "into", "just", "like", "more", "most", "much", "only", "other",
    "over", "same", "should", "some", "such", "than", "that", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "under",
    "until", "very", "want", "were", "what", "when", "where", "which", "while",
    "will", "with", "would", "your",
];

/// Keyword extraction for suggestion matching: lowercase, punctuation
/// stripped, stop words removed, tokens longer than 3 characters, first 10
/// kept in order of appearance.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords = Vec::new();
    for token in text.split_whitespace() {
        let word: String = token
            .chars()
            .filter(|ch| ch.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if word.len() <= 3 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        if !keywords.contains(&word) {
            keywords.push(word);
        }
        if keywords.len() == 10 {
            break;
        }
    }
    keywords
}

/// Deterministic related-content suggestions: tag-derived candidates first
/// (similarity 0.8 - 0.1*rank), then keyword-derived candidates
/// (0.7 - 0.1*rank), deduplicated and truncated to the limit. No generative
/// call.
pub fn smart_suggestions(thread: &Thread, limit: usize) -> Vec<SmartSuggestion> {
    let mut suggestions: Vec<SmartSuggestion> = Vec::new();

    for (rank, tag) in thread.tags.iter().take(2).enumerate() {
        suggestions.push(SmartSuggestion {
            id: format!("related-tag-{:x}", stable_hash64(&tag.name)),
            title: format!("More discussions tagged \"{}\"", tag.name),
            similarity: 0.8 - 0.1 * rank as f64,
            reason: format!("Shares the \"{}\" tag", tag.name),
        });
    }

    let haystack = format!("{} {}", thread.title, thread.body);
    for (rank, keyword) in extract_keywords(&haystack).iter().take(2).enumerate() {
        suggestions.push(SmartSuggestion {
            id: format!("related-kw-{:x}", stable_hash64(keyword)),
            title: format!("Threads mentioning \"{}\"", keyword),
            similarity: 0.7 - 0.1 * rank as f64,
            reason: format!("Mentions \"{}\"", keyword),
        });
    }

    dedupe_by_id(&mut suggestions);
    suggestions.truncate(limit);
    suggestions
}

fn dedupe_by_id(suggestions: &mut Vec<SmartSuggestion>) {
    let mut seen = std::collections::HashSet::new();
    suggestions.retain(|suggestion| seen.insert(suggestion.id.clone()));
}
